//! Snake rules: movement, food, collisions, levels and speed

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Pixel size of one grid cell at the reference 800x600 board
pub const GRID_SIZE: i32 = 20;
pub const GRID_COLS: i32 = 800 / GRID_SIZE;
pub const GRID_ROWS: i32 = 600 / GRID_SIZE;
/// Cells of wall along every edge
pub const WALL_THICKNESS: i32 = 2;

pub const INITIAL_SPEED_MS: u64 = 200;
/// Step interval change per speed-up, negative means faster
pub const SPEED_INCREMENT_MS: i64 = -25;
pub const MIN_SPEED_MS: u64 = 50;
pub const FRUITS_PER_LEVEL: u32 = 3;
pub const LEVELS_PER_SPEED_INCREASE: u32 = 3;
/// First level that spawns two foods at a time
pub const MULTI_FOOD_LEVEL: u32 = 5;

pub const START_POSITION: Position = Position { x: 10, y: 10 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// True for cells covered by the surrounding wall
    pub fn is_wall(self) -> bool {
        self.x < WALL_THICKNESS
            || self.y < WALL_THICKNESS
            || self.x >= GRID_COLS - WALL_THICKNESS
            || self.y >= GRID_ROWS - WALL_THICKNESS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FruitType {
    Apple,
    RottenApple,
    SpecialApple,
}

impl FruitType {
    /// Points awarded when eaten
    pub fn score(self) -> i64 {
        match self {
            FruitType::Apple => 1,
            FruitType::RottenApple => -2,
            FruitType::SpecialApple => 4,
        }
    }

    /// Segments added (or removed, when negative) when eaten
    pub fn length(self) -> i32 {
        match self {
            FruitType::Apple => 1,
            FruitType::RottenApple => -2,
            FruitType::SpecialApple => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub kind: FruitType,
}

/// What happened during one call to [`SnakeGame::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// Paused or already over, nothing moved
    Idle,
    Moved,
    Ate(FruitType),
    GameOver,
}

/// Full state of one game of snake
///
/// The head is the front of `snake`. Time is not tracked here: the caller
/// invokes `step` every `speed_ms` milliseconds.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    pub snake: VecDeque<Position>,
    pub direction: Direction,
    next_direction: Direction,
    pub foods: Vec<Food>,
    pub score: i64,
    pub level: u32,
    pub fruits_eaten: u32,
    pub speed_ms: u64,
    pub last_speed_increase_level: u32,
    pub game_over: bool,
    pub paused: bool,
    pending_growth: i32,
    rng: StdRng,
}

impl SnakeGame {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Game with reproducible directions and food placement
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        let mut game = Self {
            snake: VecDeque::new(),
            direction: Direction::Right,
            next_direction: Direction::Right,
            foods: Vec::new(),
            score: 0,
            level: 1,
            fruits_eaten: 0,
            speed_ms: INITIAL_SPEED_MS,
            last_speed_increase_level: 1,
            game_over: false,
            paused: false,
            pending_growth: 0,
            rng,
        };
        game.reset();
        game
    }

    /// Starts over with a one-segment snake heading in a random direction
    pub fn reset(&mut self) {
        self.snake.clear();
        self.snake.push_back(START_POSITION);

        let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
        self.direction = direction;
        self.next_direction = direction;

        self.score = 0;
        self.level = 1;
        self.fruits_eaten = 0;
        self.speed_ms = INITIAL_SPEED_MS;
        self.last_speed_increase_level = 1;
        self.game_over = false;
        self.paused = false;
        self.pending_growth = 0;

        self.generate_food();
    }

    pub fn head(&self) -> Position {
        self.snake.front().copied().unwrap_or(START_POSITION)
    }

    /// Queues a turn for the next step; reversing onto the body is ignored
    pub fn set_direction(&mut self, direction: Direction) {
        if direction != self.direction.opposite() {
            self.next_direction = direction;
        }
    }

    pub fn toggle_pause(&mut self) {
        if !self.game_over {
            self.paused = !self.paused;
        }
    }

    /// True if a head at `position` would hit a wall or the snake
    pub fn is_collision(&self, position: Position) -> bool {
        position.is_wall() || self.snake.contains(&position)
    }

    pub fn is_food_on_snake(&self, position: Position) -> bool {
        self.snake.contains(&position)
    }

    pub fn is_food_on_food(&self, position: Position) -> bool {
        self.foods.iter().any(|f| f.position == position)
    }

    /// Replaces all foods for the current level
    ///
    /// Below level 5 there is a single apple. From level 5 on an apple is
    /// joined by either a rotten or a special apple. Foods never overlap the
    /// snake or each other.
    pub fn generate_food(&mut self) {
        self.foods.clear();

        let mut kinds = vec![FruitType::Apple];
        if self.level >= MULTI_FOOD_LEVEL {
            let extra = if self.rng.gen_bool(0.5) {
                FruitType::RottenApple
            } else {
                FruitType::SpecialApple
            };
            kinds.push(extra);
        }

        for kind in kinds {
            let free: Vec<Position> = (WALL_THICKNESS..GRID_COLS - WALL_THICKNESS)
                .flat_map(|x| {
                    (WALL_THICKNESS..GRID_ROWS - WALL_THICKNESS).map(move |y| Position::new(x, y))
                })
                .filter(|p| !self.is_food_on_snake(*p) && !self.is_food_on_food(*p))
                .collect();

            match free.choose(&mut self.rng) {
                Some(&position) => self.foods.push(Food { position, kind }),
                None => debug!("No free cell left for {:?}", kind),
            }
        }
    }

    /// Advances the snake by one cell
    pub fn step(&mut self) -> StepEvent {
        if self.game_over || self.paused {
            return StepEvent::Idle;
        }

        self.direction = self.next_direction;
        let new_head = self.head().step(self.direction);

        if self.is_collision(new_head) {
            self.game_over = true;
            debug!("Game over at {:?} with score {}", new_head, self.score);
            return StepEvent::GameOver;
        }

        self.snake.push_front(new_head);

        let eaten = self
            .foods
            .iter()
            .find(|f| f.position == new_head)
            .map(|f| f.kind);
        if let Some(kind) = eaten {
            self.eat(kind);
        }

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.snake.pop_back();
        }
        while self.pending_growth < 0 && self.snake.len() > 1 {
            self.snake.pop_back();
            self.pending_growth += 1;
        }
        self.pending_growth = self.pending_growth.max(0);

        match eaten {
            Some(kind) => StepEvent::Ate(kind),
            None => StepEvent::Moved,
        }
    }

    fn eat(&mut self, kind: FruitType) {
        self.score = (self.score + kind.score()).max(0);
        self.pending_growth += kind.length();
        self.fruits_eaten += 1;
        self.level = self.fruits_eaten / FRUITS_PER_LEVEL + 1;

        if self.level >= self.last_speed_increase_level + LEVELS_PER_SPEED_INCREASE {
            let faster = self.speed_ms as i64 + SPEED_INCREMENT_MS;
            self.speed_ms = faster.max(MIN_SPEED_MS as i64) as u64;
            self.last_speed_increase_level = self.level;
            debug!("Level {}: step interval now {}ms", self.level, self.speed_ms);
        }

        self.generate_food();
    }
}

impl Default for SnakeGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Game heading right with one apple directly in front of the head
    fn game_with_food_ahead(kind: FruitType) -> SnakeGame {
        let mut game = SnakeGame::with_seed(7);
        game.direction = Direction::Right;
        game.next_direction = Direction::Right;
        game.foods = vec![Food {
            position: Position::new(11, 10),
            kind,
        }];
        game
    }

    #[test]
    fn test_initial_state() {
        let game = SnakeGame::with_seed(1);
        assert_eq!(game.score, 0);
        assert_eq!(game.level, 1);
        assert_eq!(game.speed_ms, INITIAL_SPEED_MS);
        assert!(!game.game_over);
        assert!(!game.paused);
        assert_eq!(game.snake, VecDeque::from(vec![START_POSITION]));
        assert_eq!(game.foods.len(), 1);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut game = SnakeGame::with_seed(2);
        game.score = 100;
        game.level = 5;
        game.game_over = true;
        game.snake.push_back(Position::new(9, 10));

        game.reset();

        assert_eq!(game.score, 0);
        assert_eq!(game.level, 1);
        assert!(!game.game_over);
        assert_eq!(game.snake.len(), 1);
        assert_eq!(game.head(), Position::new(10, 10));
        assert!(Direction::ALL.contains(&game.direction));
    }

    #[test]
    fn test_food_within_walls() {
        let mut game = SnakeGame::with_seed(3);
        for _ in 0..50 {
            game.generate_food();
            let food = game.foods[0].position;
            assert!(food.x >= 2 && food.x < 38, "x = {}", food.x);
            assert!(food.y >= 2 && food.y < 28, "y = {}", food.y);
        }
    }

    #[test]
    fn test_food_not_on_snake() {
        let mut game = SnakeGame::with_seed(4);
        game.snake = VecDeque::from(vec![Position::new(10, 10)]);

        for _ in 0..10 {
            game.generate_food();
            assert_ne!(game.foods[0].position, Position::new(10, 10));
        }
    }

    #[test]
    fn test_food_avoids_crowded_board() {
        let mut game = SnakeGame::with_seed(5);
        // Fill every playable cell but one
        game.snake = (2..38)
            .flat_map(|x| (2..28).map(move |y| Position::new(x, y)))
            .filter(|p| *p != Position::new(20, 20))
            .collect();

        game.generate_food();
        assert_eq!(game.foods.len(), 1);
        assert_eq!(game.foods[0].position, Position::new(20, 20));
    }

    #[test]
    fn test_single_apple_below_level_five() {
        let mut game = SnakeGame::with_seed(6);
        game.level = 3;

        game.generate_food();

        assert_eq!(game.foods.len(), 1);
        assert_eq!(game.foods[0].kind, FruitType::Apple);
    }

    #[test]
    fn test_two_foods_from_level_five() {
        let mut game = SnakeGame::with_seed(8);
        game.level = 5;

        for _ in 0..20 {
            game.generate_food();
            assert_eq!(game.foods.len(), 2);
            assert_eq!(game.foods[0].kind, FruitType::Apple);
            assert_ne!(game.foods[1].kind, FruitType::Apple);
            assert_ne!(game.foods[0].position, game.foods[1].position);
        }
    }

    #[test]
    fn test_wall_collision() {
        let game = SnakeGame::with_seed(9);
        assert!(game.is_collision(Position::new(1, 10)));
        assert!(game.is_collision(Position::new(38, 10)));
        assert!(game.is_collision(Position::new(10, 1)));
        assert!(game.is_collision(Position::new(10, 28)));
    }

    #[test]
    fn test_self_collision() {
        let mut game = SnakeGame::with_seed(10);
        game.snake = VecDeque::from(vec![
            Position::new(10, 10),
            Position::new(9, 10),
            Position::new(8, 10),
            Position::new(7, 10),
        ]);
        assert!(game.is_collision(Position::new(9, 10)));
    }

    #[test]
    fn test_no_collision_on_free_cell() {
        let game = SnakeGame::with_seed(11);
        assert!(!game.is_collision(Position::new(15, 15)));
    }

    #[test]
    fn test_food_overlap_checks() {
        let mut game = SnakeGame::with_seed(12);
        game.snake = VecDeque::from(vec![Position::new(10, 10)]);
        game.foods = vec![Food {
            position: Position::new(20, 20),
            kind: FruitType::Apple,
        }];

        assert!(game.is_food_on_snake(Position::new(10, 10)));
        assert!(!game.is_food_on_snake(Position::new(15, 15)));
        assert!(game.is_food_on_food(Position::new(20, 20)));
        assert!(!game.is_food_on_food(Position::new(15, 15)));
    }

    #[test]
    fn test_step_moves_head() {
        let mut game = game_with_food_ahead(FruitType::Apple);
        game.foods.clear();
        game.set_direction(Direction::Down);

        assert_eq!(game.step(), StepEvent::Moved);
        assert_eq!(game.snake, VecDeque::from(vec![Position::new(10, 11)]));
    }

    #[test]
    fn test_reverse_turn_ignored() {
        let mut game = game_with_food_ahead(FruitType::Apple);
        game.foods.clear();
        game.set_direction(Direction::Left);

        game.step();
        assert_eq!(game.direction, Direction::Right);
        assert_eq!(game.head(), Position::new(11, 10));
    }

    #[test]
    fn test_eating_apple_grows_and_scores() {
        let mut game = game_with_food_ahead(FruitType::Apple);

        assert_eq!(game.step(), StepEvent::Ate(FruitType::Apple));
        assert_eq!(game.score, 1);
        assert_eq!(game.fruits_eaten, 1);
        assert_eq!(
            game.snake,
            VecDeque::from(vec![Position::new(11, 10), Position::new(10, 10)])
        );
        assert_eq!(game.foods.len(), 1);
        assert!(!game.is_food_on_snake(game.foods[0].position));
    }

    #[test]
    fn test_special_apple_grows_over_several_steps() {
        let mut game = game_with_food_ahead(FruitType::SpecialApple);

        game.step();
        assert_eq!(game.score, 4);
        assert_eq!(game.snake.len(), 2);

        game.foods.clear();
        for _ in 0..5 {
            game.step();
        }
        assert_eq!(game.snake.len(), 5);
    }

    #[test]
    fn test_rotten_apple_shrinks_but_keeps_head() {
        let mut game = game_with_food_ahead(FruitType::RottenApple);
        game.score = 1;
        game.snake = VecDeque::from(vec![Position::new(10, 10), Position::new(9, 10)]);

        game.step();

        assert_eq!(game.score, 0);
        assert_eq!(game.snake, VecDeque::from(vec![Position::new(11, 10)]));
    }

    #[test]
    fn test_rotten_apple_removes_two_segments() {
        let mut game = game_with_food_ahead(FruitType::RottenApple);
        game.score = 10;
        game.snake = (0..5).map(|i| Position::new(10 - i, 10)).collect();

        game.step();

        assert_eq!(game.score, 8);
        assert_eq!(game.snake.len(), 3);
        assert_eq!(game.head(), Position::new(11, 10));
    }

    #[test]
    fn test_level_from_fruits_eaten() {
        let mut game = SnakeGame::with_seed(13);
        for _ in 0..FRUITS_PER_LEVEL {
            game.eat(FruitType::Apple);
        }
        assert_eq!(game.level, 2);
        assert_eq!(game.speed_ms, INITIAL_SPEED_MS);
    }

    #[test]
    fn test_speed_increases_every_three_levels() {
        let mut game = SnakeGame::with_seed(14);

        // Level 4 is reached on the ninth fruit
        for _ in 0..9 {
            game.eat(FruitType::Apple);
        }
        assert_eq!(game.level, 4);
        assert_eq!(game.speed_ms, 175);
        assert_eq!(game.last_speed_increase_level, 4);

        for _ in 0..9 {
            game.eat(FruitType::Apple);
        }
        assert_eq!(game.level, 7);
        assert_eq!(game.speed_ms, 150);
    }

    #[test]
    fn test_speed_has_floor() {
        let mut game = SnakeGame::with_seed(15);
        for _ in 0..200 {
            game.eat(FruitType::Apple);
        }
        assert_eq!(game.speed_ms, MIN_SPEED_MS);
    }

    #[test]
    fn test_wall_ends_game() {
        let mut game = game_with_food_ahead(FruitType::Apple);
        game.foods.clear();
        game.snake = VecDeque::from(vec![Position::new(37, 10)]);

        assert_eq!(game.step(), StepEvent::GameOver);
        assert!(game.game_over);
        assert_eq!(game.step(), StepEvent::Idle);
        assert_eq!(game.head(), Position::new(37, 10));
    }

    #[test]
    fn test_toggle_pause() {
        let mut game = SnakeGame::with_seed(16);
        assert!(!game.paused);

        game.toggle_pause();
        assert!(game.paused);
        let head = game.head();
        assert_eq!(game.step(), StepEvent::Idle);
        assert_eq!(game.head(), head);

        game.toggle_pause();
        assert!(!game.paused);
    }

    #[test]
    fn test_no_pause_after_game_over() {
        let mut game = SnakeGame::with_seed(17);
        game.game_over = true;
        game.toggle_pause();
        assert!(!game.paused);
    }
}
