use crate::domain::ports::StateObserver;
use crate::domain::product::Product;
use crate::domain::state::MachineState;
use std::io::{self, Write};
use tracing::warn;

/// Text rendition of the machine's front panel.
///
/// Redraws the deposit, each product button with its price and stock, and the
/// latest message whenever the engine reports a change. With `verbose` set it
/// also prints the full state report.
pub struct ConsoleDisplay<W: Write + Send> {
    out: W,
    verbose: bool,
}

impl<W: Write + Send> ConsoleDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, state: &MachineState) -> io::Result<()> {
        writeln!(self.out, "Deposited: {}", state.deposited_label())?;
        for product in Product::ALL {
            writeln!(
                self.out,
                "[{product}]{} ({} left)",
                state.price_label(product),
                state.stock(product)
            )?;
        }
        writeln!(self.out, "> {}", state.message())?;
        if self.verbose {
            write!(self.out, "{state}")?;
        }
        self.out.flush()
    }
}

impl<W: Write + Send> StateObserver for ConsoleDisplay<W> {
    fn on_state_changed(&mut self, state: &MachineState) {
        if let Err(e) = self.render(state) {
            warn!(error = %e, "Failed to render display");
        }
    }
}
