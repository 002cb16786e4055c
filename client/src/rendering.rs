use crate::game::{FruitType, Position, SnakeGame, GRID_COLS, GRID_ROWS, WALL_THICKNESS};
use crate::ui::{BoardView, SaveStatus, Screen, UiState};
use macroquad::prelude::*;
use shared::ScoreRecord;

const BACKGROUND: Color = Color::new(0.10, 0.10, 0.10, 1.0);
const WALL: Color = Color::new(0.27, 0.27, 0.27, 1.0);
const SNAKE_HEAD: Color = Color::new(0.18, 0.80, 0.44, 1.0);
const SNAKE_BODY: Color = Color::new(0.15, 0.68, 0.38, 1.0);
const APPLE: Color = Color::new(0.91, 0.30, 0.24, 1.0);
const ROTTEN_APPLE: Color = Color::new(0.0, 0.0, 0.0, 1.0);
const SPECIAL_APPLE: Color = Color::new(1.0, 0.41, 0.71, 1.0);

/// Formats the board as a ranked table, one entry per line
pub fn render_leaderboard(scores: &[ScoreRecord]) -> String {
    if scores.is_empty() {
        return "No highscores yet\n".to_string();
    }

    let name_width = scores
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut out = format!("{:>3}  {:<name_width$}  {:>10}\n", "#", "Name", "Score");
    for (i, record) in scores.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}  {:<name_width$}  {:>10}\n",
            i + 1,
            record.name,
            record.score
        ));
    }
    out
}

/// Where the grid sits inside the window
///
/// Cells stay square; the board is centered and scaled to the largest size
/// that fits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub cell: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl BoardLayout {
    pub fn fit(width: f32, height: f32) -> Self {
        let cell = (width / GRID_COLS as f32).min(height / GRID_ROWS as f32).max(1.0);
        Self {
            cell,
            offset_x: (width - cell * GRID_COLS as f32) / 2.0,
            offset_y: (height - cell * GRID_ROWS as f32) / 2.0,
        }
    }

    /// Top-left pixel of a grid cell
    pub fn cell_origin(&self, position: Position) -> (f32, f32) {
        (
            self.offset_x + position.x as f32 * self.cell,
            self.offset_y + position.y as f32 * self.cell,
        )
    }
}

fn fruit_color(kind: FruitType) -> Color {
    match kind {
        FruitType::Apple => APPLE,
        FruitType::RottenApple => ROTTEN_APPLE,
        FruitType::SpecialApple => SPECIAL_APPLE,
    }
}

/// Draws the current screen into the macroquad window
pub struct Renderer {
    layout: BoardLayout,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            layout: BoardLayout::fit(screen_width(), screen_height()),
        }
    }

    pub fn render(&mut self, ui: &UiState) {
        self.layout = BoardLayout::fit(screen_width(), screen_height());
        clear_background(BACKGROUND);

        match ui.screen {
            Screen::Menu => self.draw_menu(),
            Screen::Highscores => self.draw_highscores(&ui.board),
            Screen::Playing => {
                self.draw_board(&ui.game);
                self.draw_hud(&ui.game);
                if ui.game.paused {
                    self.draw_centered(&["Paused", "P to resume, R to restart, Esc to quit"]);
                }
            }
            Screen::GameOver => {
                self.draw_board(&ui.game);
                self.draw_hud(&ui.game);
                self.draw_game_over(ui);
            }
        }
    }

    fn draw_board(&self, game: &SnakeGame) {
        let size = self.layout.cell;
        let (x, y) = self.layout.cell_origin(Position::new(0, 0));
        let wall = WALL_THICKNESS as f32 * size;
        let width = GRID_COLS as f32 * size;
        let height = GRID_ROWS as f32 * size;

        draw_rectangle(x, y, width, wall, WALL);
        draw_rectangle(x, y + height - wall, width, wall, WALL);
        draw_rectangle(x, y, wall, height, WALL);
        draw_rectangle(x + width - wall, y, wall, height, WALL);

        for food in &game.foods {
            let (fx, fy) = self.layout.cell_origin(food.position);
            draw_circle(fx + size / 2.0, fy + size / 2.0, size * 0.4, fruit_color(food.kind));
            if food.kind == FruitType::RottenApple {
                draw_circle_lines(fx + size / 2.0, fy + size / 2.0, size * 0.4, 1.0, GRAY);
            }
        }

        for (i, segment) in game.snake.iter().enumerate() {
            let (sx, sy) = self.layout.cell_origin(*segment);
            let color = if i == 0 { SNAKE_HEAD } else { SNAKE_BODY };
            draw_rectangle(sx + 1.0, sy + 1.0, size - 2.0, size - 2.0, color);
        }
    }

    fn draw_hud(&self, game: &SnakeGame) {
        let (x, y) = self.layout.cell_origin(Position::new(WALL_THICKNESS, 0));
        let text = format!(
            "Score: {}   Level: {}   Speed: {}ms",
            game.score, game.level, game.speed_ms
        );
        draw_text(&text, x, y + self.layout.cell * 1.4, self.layout.cell, WHITE);
    }

    fn draw_menu(&self) {
        self.draw_centered(&["SNAKE", "", "Enter to play", "H for highscores"]);
    }

    fn draw_highscores(&self, board: &BoardView) {
        let table = match board {
            BoardView::Loading => "Loading...\n".to_string(),
            BoardView::Loaded(scores) => render_leaderboard(scores),
            BoardView::Failed(reason) => format!("Could not load highscores:\n{}\n", reason),
        };

        let font_size = self.layout.cell;
        let (x, y) = self.layout.cell_origin(Position::new(WALL_THICKNESS + 2, WALL_THICKNESS + 2));
        draw_text("Highscores", x, y, font_size * 1.5, YELLOW);
        for (i, line) in table.lines().enumerate() {
            draw_text(line, x, y + font_size * (i as f32 + 2.0), font_size, WHITE);
        }
        draw_text(
            "Esc to go back",
            x,
            y + font_size * (table.lines().count() as f32 + 4.0),
            font_size * 0.8,
            GRAY,
        );
    }

    fn draw_game_over(&self, ui: &UiState) {
        let score = format!("Score: {}", ui.game.score);
        let name = format!("Name: {}_", ui.name.as_str());
        let status = match &ui.save {
            SaveStatus::NotSaved => "Enter to save, F5 to play again, Esc for menu".to_string(),
            SaveStatus::Saving => "Saving...".to_string(),
            SaveStatus::Saved { rank: Some(rank) } => format!("Saved! You placed #{}", rank),
            SaveStatus::Saved { rank: None } => "Saved, but not in the top 10".to_string(),
            SaveStatus::Failed(reason) => format!("Save failed: {} (Enter to retry)", reason),
        };

        self.draw_centered(&["Game over", score.as_str(), name.as_str(), status.as_str()]);
    }

    fn draw_centered(&self, lines: &[&str]) {
        let font_size = self.layout.cell * 1.2;
        let center_x = self.layout.offset_x + GRID_COLS as f32 * self.layout.cell / 2.0;
        let top = self.layout.offset_y + GRID_ROWS as f32 * self.layout.cell / 2.0
            - font_size * lines.len() as f32 / 2.0;

        for (i, line) in lines.iter().enumerate() {
            let dims = measure_text(line, None, font_size as u16, 1.0);
            draw_text(
                line,
                center_x - dims.width / 2.0,
                top + font_size * (i as f32 + 1.0),
                font_size,
                WHITE,
            );
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(render_leaderboard(&[]), "No highscores yet\n");
    }

    #[test]
    fn test_render_ranks_in_order() {
        let scores = vec![ScoreRecord::new("Alice", 100), ScoreRecord::new("Bob", 80)];
        let out = render_leaderboard(&scores);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "  #  Name        Score");
        assert_eq!(lines[1], "  1  Alice         100");
        assert_eq!(lines[2], "  2  Bob            80");
    }

    #[test]
    fn test_render_pads_to_longest_name() {
        let scores = vec![ScoreRecord::new("Maximilian", 5)];
        let out = render_leaderboard(&scores);

        assert!(out.starts_with("  #  Name        "));
        assert!(out.contains("  1  Maximilian           5"));
    }

    #[test]
    fn test_layout_reference_size() {
        let layout = BoardLayout::fit(800.0, 600.0);
        assert_eq!(layout.cell, 20.0);
        assert_eq!(layout.offset_x, 0.0);
        assert_eq!(layout.offset_y, 0.0);
        assert_eq!(layout.cell_origin(Position::new(10, 10)), (200.0, 200.0));
    }

    #[test]
    fn test_layout_keeps_cells_square() {
        // Wide window: height limits the cell, board centered horizontally
        let layout = BoardLayout::fit(1000.0, 300.0);
        assert_eq!(layout.cell, 10.0);
        assert_eq!(layout.offset_x, 300.0);
        assert_eq!(layout.offset_y, 0.0);

        // Tall window: width limits the cell
        let layout = BoardLayout::fit(400.0, 900.0);
        assert_eq!(layout.cell, 10.0);
        assert_eq!(layout.offset_x, 0.0);
        assert_eq!(layout.offset_y, 300.0);
    }
}
