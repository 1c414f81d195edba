use std::io;
use std::panic;
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::config::Palette;
use crate::game::GameState;
use crate::renderer;

static PANIC_HOOK: Once = Once::new();

/// A ratatui terminal paired with the palette every frame is drawn in.
pub struct GameScreen<B: Backend> {
    terminal: Terminal<B>,
    palette: Palette,
}

impl<B: Backend> GameScreen<B> {
    #[must_use]
    pub fn new(terminal: Terminal<B>, palette: Palette) -> Self {
        Self { terminal, palette }
    }

    /// Draws one frame of `state`.
    pub fn show(&mut self, state: &GameState) -> io::Result<()> {
        self.terminal
            .draw(|frame| renderer::render(frame, state, &self.palette))?;
        Ok(())
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

/// Raw-mode, alternate-screen stdout for the length of one run.
///
/// Dropping the session, or panicking while it is alive, puts the terminal
/// back into cooked mode with the cursor visible.
pub struct TerminalSession {
    screen: GameScreen<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    pub fn enter(palette: Palette) -> io::Result<Self> {
        PANIC_HOOK.call_once(chain_restoring_panic_hook);
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout)).inspect_err(|_| {
            let _ = leave_game_screen();
        })?;

        Ok(Self {
            screen: GameScreen::new(terminal, palette),
        })
    }

    pub fn screen_mut(&mut self) -> &mut GameScreen<CrosstermBackend<io::Stdout>> {
        &mut self.screen
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = leave_game_screen();
    }
}

fn chain_restoring_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = leave_game_screen();
        default_hook(panic_info);
    }));
}

fn leave_game_screen() -> io::Result<()> {
    let _ = disable_raw_mode();
    execute!(io::stdout(), Show, LeaveAlternateScreen)
}
