use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use retro_snake::audio::{AudioEvent, Cue, RecordingAudio, Stream};
use retro_snake::game::{
    Direction, Game, GameConfig, GameOverReason, Phase, Position, TickScheduler,
};

fn started_game(config: GameConfig, seed: u64) -> Game<RecordingAudio> {
    let mut game =
        Game::with_rng(config, StdRng::seed_from_u64(seed), RecordingAudio::new()).unwrap();
    game.press_direction(Direction::Right);
    game.audio_mut().take();
    game
}

#[test]
fn head_leaving_the_board_ends_the_session() {
    let mut game = started_game(GameConfig::default(), 1);
    game.place_food(Position::new(0, 0)).unwrap();
    game.place_snake(
        &[Position::new(24, 9), Position::new(23, 9), Position::new(22, 9)],
        Direction::Right,
    )
    .unwrap();

    let outcome = game.update();

    assert_eq!(outcome.game_over, Some(GameOverReason::Wall));
    assert_eq!(game.phase(), Phase::NotStarted);
    assert_eq!(
        game.snake().body().iter().copied().collect::<Vec<_>>(),
        GameConfig::default().initial_body
    );
}

#[test]
fn eating_scores_and_speeds_up() {
    let mut game = started_game(GameConfig::default(), 2);
    game.place_food(Position::new(7, 9)).unwrap();

    let outcome = game.update();

    assert!(outcome.ate_food);
    assert_eq!(game.score(), 1);
    assert!((game.pace() - 0.19).abs() < 1e-9);
    assert!(!game.snake().body().contains(&game.food()));
    assert_eq!(game.audio().events, vec![AudioEvent::Play(Cue::Eat)]);
}

#[test]
fn best_score_survives_sessions() {
    let mut game = started_game(GameConfig::default(), 3);

    for (eats, expected_best) in [(2, 2), (1, 2), (3, 3)] {
        for _ in 0..eats {
            let next = game.snake().head().moved_in_direction(game.snake().direction());
            game.place_food(next).unwrap();
            game.update();
        }
        game.place_food(Position::new(0, 0)).unwrap();
        while game.phase() == Phase::Running {
            game.update();
        }
        assert_eq!(game.best_score(), expected_best);
        assert_eq!(game.score(), 0);
        assert_eq!(game.pace(), 0.2);

        game.press_direction(Direction::Up);
        game.place_food(Position::new(0, 0)).unwrap();
    }
}

#[test]
fn random_play_keeps_invariants() {
    let config = GameConfig {
        seed: Some(11),
        ..GameConfig::new(12)
    };
    let mut game = Game::new(config, RecordingAudio::new()).unwrap();
    let mut inputs = StdRng::seed_from_u64(99);
    let mut sessions = 0;

    for _ in 0..5_000 {
        if game.phase() != Phase::Running {
            game.press_direction(Direction::Right);
            sessions += 1;
        }

        if inputs.gen_bool(0.3) {
            let direction = Direction::ALL[inputs.gen_range(0..4)];
            let before = game.snake().direction();
            game.press_direction(direction);
            if before.is_opposite(direction) {
                assert_eq!(game.snake().direction(), before);
            }
        }

        let len_before = game.snake().len();
        let best_before = game.best_score();
        let score_before = game.score();
        let outcome = game.update();

        if outcome.game_over.is_some() {
            assert_eq!(game.score(), 0);
            assert_eq!(game.pace(), game.config().initial_pace);
            assert_eq!(game.snake().len(), game.config().initial_body.len());
            assert_eq!(game.best_score(), best_before.max(outcome.score));
            assert!(outcome.score >= score_before);
        } else {
            let grown = game.snake().len() - len_before;
            assert!(grown <= 1, "snake grew by {grown} in one tick");
            assert!(game.config().in_bounds(game.snake().head()));
        }

        assert!(!game.snake().body().contains(&game.food()));
        assert!(game.best_score() >= best_before);
    }

    assert!(sessions > 1);
}

#[test]
fn scheduler_drives_one_tick_per_boundary() {
    let mut game = started_game(GameConfig::default(), 4);
    game.place_food(Position::new(0, 0)).unwrap();
    let mut scheduler = TickScheduler::starting_at(0.0);

    let mut ticks = 0;
    for frame in 1..=60 {
        let now = frame as f64 / 60.0;
        if game.is_active() && scheduler.is_due(now, game.pace()) {
            game.update();
            ticks += 1;
        }
    }

    // one second at 0.2s per tick
    assert!((4..=5).contains(&ticks), "ticked {ticks} times");
    assert_eq!(game.snake().head(), Position::new(6 + ticks, 9));
}

#[test]
fn pausing_controls_background_stream() {
    let mut game =
        Game::with_rng(GameConfig::default(), StdRng::seed_from_u64(5), RecordingAudio::new())
            .unwrap();

    game.toggle_pause();
    assert!(game.audio().events.is_empty());

    game.press_direction(Direction::Up);
    game.toggle_pause();
    game.toggle_pause();
    game.place_food(Position::new(0, 0)).unwrap();
    game.place_snake(&[Position::new(24, 0), Position::new(23, 0)], Direction::Right)
        .unwrap();
    game.update();

    assert_eq!(
        game.audio().events,
        vec![
            AudioEvent::Start(Stream::Background),
            AudioEvent::Pause(Stream::Background),
            AudioEvent::Resume(Stream::Background),
            AudioEvent::Play(Cue::Collision),
            AudioEvent::Stop(Stream::Background),
        ]
    );
}
