use rand::seq::IteratorRandom;
use rand::Rng;

use super::config::GameConfig;
use super::error::GameError;
use super::state::{occupied, Position};

/// The single piece of food on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    position: Position,
    grid_size: i32,
    max_attempts: u32,
}

impl Food {
    /// Place the first piece of food somewhere off `snake_body`
    pub fn new<'a, R: Rng>(
        config: &GameConfig,
        snake_body: impl IntoIterator<Item = &'a Position> + Clone,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let mut food = Self {
            position: Position::new(0, 0),
            grid_size: config.grid_size,
            max_attempts: config.food_max_attempts,
        };
        food.relocate(snake_body, rng)?;
        Ok(food)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Put the food on a chosen cell
    ///
    /// The cell must be on the board and outside `occupied_cells`;
    /// otherwise the food stays where it was.
    pub fn place<'a>(
        &mut self,
        position: Position,
        occupied_cells: impl IntoIterator<Item = &'a Position>,
    ) -> Result<(), GameError> {
        let on_board = (0..self.grid_size).contains(&position.x)
            && (0..self.grid_size).contains(&position.y);
        if !on_board || occupied(occupied_cells, position) {
            return Err(GameError::CellUnavailable(position));
        }
        self.position = position;
        Ok(())
    }

    /// Move the food to a uniformly chosen cell not in `occupied_cells`
    ///
    /// Random draws are tried first; once `max_attempts` draws have all
    /// landed on the snake the free cells are enumerated instead. The
    /// position is left untouched when the board is full.
    pub fn relocate<'a, R: Rng>(
        &mut self,
        occupied_cells: impl IntoIterator<Item = &'a Position> + Clone,
        rng: &mut R,
    ) -> Result<Position, GameError> {
        for _ in 0..self.max_attempts {
            let candidate = self.random_cell(rng);
            if !occupied(occupied_cells.clone(), candidate) {
                self.position = candidate;
                return Ok(candidate);
            }
        }

        let size = self.grid_size;
        let free = (0..size)
            .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
            .filter(|cell| !occupied(occupied_cells.clone(), *cell))
            .choose(rng)
            .ok_or(GameError::NoFreeCell { grid_size: size })?;

        self.position = free;
        Ok(free)
    }

    fn random_cell<R: Rng>(&self, rng: &mut R) -> Position {
        let x = rng.gen_range(0..self.grid_size);
        let y = rng.gen_range(0..self.grid_size);
        Position::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_new_food_avoids_snake() {
        let config = GameConfig::default();
        let mut rng = rng();

        for _ in 0..100 {
            let food = Food::new(&config, &config.initial_body, &mut rng).unwrap();
            assert!(!config.initial_body.contains(&food.position()));
            assert!(config.in_bounds(food.position()));
        }
    }

    #[test]
    fn test_relocate_finds_last_free_cell() {
        let config = GameConfig {
            food_max_attempts: 1,
            ..GameConfig::new(4)
        };
        let free = Position::new(2, 3);
        let body: Vec<Position> = (0..4)
            .flat_map(|y| (0..4).map(move |x| Position::new(x, y)))
            .filter(|cell| *cell != free)
            .collect();

        let mut food = Food::new(&config, &config.initial_body[..0], &mut rng()).unwrap();
        for _ in 0..20 {
            assert_eq!(food.relocate(&body, &mut rng()), Ok(free));
        }
    }

    #[test]
    fn test_relocate_on_full_board() {
        let config = GameConfig::new(3);
        let body: Vec<Position> = (0..3)
            .flat_map(|y| (0..3).map(move |x| Position::new(x, y)))
            .collect();

        let mut food = Food::new(&config, &body[..1], &mut rng()).unwrap();
        let before = food.position();

        assert_eq!(
            food.relocate(&body, &mut rng()),
            Err(GameError::NoFreeCell { grid_size: 3 })
        );
        assert_eq!(food.position(), before);
    }

    #[test]
    fn test_place_rejects_taken_or_missing_cells() {
        let config = GameConfig::default();
        let body = &config.initial_body;
        let mut food = Food::new(&config, body, &mut rng()).unwrap();
        let before = food.position();

        assert_eq!(
            food.place(body[1], body),
            Err(GameError::CellUnavailable(body[1]))
        );
        assert!(food.place(Position::new(25, 3), body).is_err());
        assert!(food.place(Position::new(-1, 3), body).is_err());
        assert_eq!(food.position(), before);

        assert_eq!(food.place(Position::new(0, 0), body), Ok(()));
        assert_eq!(food.position(), Position::new(0, 0));
    }

    #[test]
    fn test_seeded_placement_is_deterministic() {
        let config = GameConfig::default();
        let a = Food::new(&config, &config.initial_body, &mut rng()).unwrap();
        let b = Food::new(&config, &config.initial_body, &mut rng()).unwrap();
        assert_eq!(a.position(), b.position());
    }
}
