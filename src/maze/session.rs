// src/maze/session.rs

use image::RgbImage;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::MazeConfig;
use crate::error::{MazeError, MazeResult};
use crate::maze::difficulty::{check_difficulty, DifficultyController, GenerationReport};
use crate::maze::generator::OriginShiftGenerator;
use crate::maze::grid::Grid;
use crate::maze::solver::{solve, Solution};
use crate::render::{self, SolutionOverlay};

/// One maze being worked on: its grid, the RNG that produced it and the
/// display state. Every operation goes through an explicit session value.
pub struct MazeSession {
    config: MazeConfig,
    rng: StdRng,
    grid: Grid,
    attempts: u64,
    bend_ratio: f64,
    solution_visible: bool,
}

impl MazeSession {
    /// Creates a session and generates its first maze at the configured
    /// difficulty.
    pub fn new(config: MazeConfig) -> MazeResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let grid = Grid::new(config.dimension)?;
        let mut session = Self {
            config,
            rng,
            grid,
            attempts: 0,
            bend_ratio: 0.0,
            solution_visible: false,
        };
        session.regenerate()?;
        Ok(session)
    }

    fn controller(&self) -> MazeResult<DifficultyController> {
        Ok(DifficultyController::strict(self.config.difficulty, self.config.dimension)?
            .with_max_attempts(self.config.max_attempts)
            .with_generator(OriginShiftGenerator::new(self.config.backtrack)))
    }

    /// Throws the current grid away and runs the difficulty loop again.
    /// On failure the previous grid is kept.
    pub fn regenerate(&mut self) -> MazeResult<&Grid> {
        let controller = self.controller()?;
        let GenerationReport {
            grid,
            attempts,
            bend_ratio,
            ..
        } = controller.run(self.config.dimension, &mut self.rng)?;
        self.grid = grid;
        self.attempts = attempts;
        self.bend_ratio = bend_ratio;
        self.solution_visible = false;
        Ok(&self.grid)
    }

    /// Changes the size used by the next [`regenerate`](Self::regenerate).
    /// The current difficulty must stay reachable at the new size.
    pub fn set_dimension(&mut self, dimension: usize) -> MazeResult<()> {
        self.configure(dimension, self.config.difficulty)
    }

    pub fn set_difficulty(&mut self, difficulty: f64) -> MazeResult<()> {
        self.configure(self.config.dimension, difficulty)
    }

    /// Sets size and difficulty together. Nothing changes unless the pair is
    /// valid.
    pub fn configure(&mut self, dimension: usize, difficulty: f64) -> MazeResult<()> {
        if dimension < 1 {
            return Err(MazeError::InvalidDimension(dimension as i64));
        }
        check_difficulty(difficulty, dimension)?;
        self.config.dimension = dimension;
        self.config.difficulty = difficulty;
        Ok(())
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Attempts the last successful regeneration took.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn bend_ratio(&self) -> f64 {
        self.bend_ratio
    }

    pub fn solution_visible(&self) -> bool {
        self.solution_visible
    }

    /// Solves the current grid from scratch.
    pub fn solve(&self) -> MazeResult<Solution> {
        solve(&self.grid)
    }

    /// Flips solution visibility. Turning it on solves the grid and returns
    /// the overlay to draw; if there is no solution the toggle stays off and
    /// the error is handed back for the caller to report.
    pub fn toggle_solution(&mut self) -> MazeResult<Option<SolutionOverlay>> {
        if self.solution_visible {
            self.solution_visible = false;
            return Ok(None);
        }
        match self.solve() {
            Ok(solution) => {
                self.solution_visible = true;
                let overlay = SolutionOverlay::new(&solution, self.config.cell_size as f64);
                info!("bends: {}", overlay.bends);
                Ok(Some(overlay))
            }
            Err(err) => {
                error!("{}", err);
                Err(err)
            }
        }
    }

    /// The overlay for the current grid if the solution is toggled on.
    pub fn overlay(&self) -> Option<SolutionOverlay> {
        if !self.solution_visible {
            return None;
        }
        self.solve()
            .ok()
            .map(|s| SolutionOverlay::new(&s, self.config.cell_size as f64))
    }

    pub fn svg(&self) -> String {
        render::render_svg(&self.grid, self.config.cell_size)
    }

    /// ASCII rendering, with the solution marked when it is toggled on.
    pub fn ascii(&self) -> String {
        let solution = if self.solution_visible { self.solve().ok() } else { None };
        render::render_ascii(&self.grid, solution.as_ref())
    }

    pub fn raster(&self, size: u32) -> MazeResult<RgbImage> {
        if self.solution_visible {
            let solution = self.solve()?;
            render::render_raster_with_solution(&self.grid, &solution, size)
        } else {
            render::render_raster(&self.grid, size)
        }
    }
}
