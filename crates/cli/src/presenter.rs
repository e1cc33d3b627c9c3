use bera_txn::{
    Chain,
    collab::Presenter,
    state::{Phase, Toast, ToastId},
};
use colored::{ColoredString, Colorize};

/// Prints toasts as they are shown. Dismissals only show up in debug logs
/// since printed lines cannot be taken back.
pub(crate) struct TerminalPresenter {
    chain: Chain,
    // Keeps stdout clean for the JSON report
    stderr: bool,
}

impl TerminalPresenter {
    pub(crate) fn new(chain: Chain, stderr: bool) -> Self { Self { chain, stderr } }

    fn paint(phase: Phase, text: String) -> ColoredString {
        match phase {
            Phase::Loading => text.yellow(),
            Phase::Submission => text.cyan(),
            Phase::Success => text.bright_green(),
            Phase::Error => text.bright_red(),
        }
    }
}

impl Presenter for TerminalPresenter {
    fn show(&self, id: &ToastId, toast: &Toast) {
        let mut line = format!("  {}", toast.title);
        if let Some(message) = &toast.message {
            line.push_str(&format!(": {}", message));
        }
        let mut out = format!("{}", Self::paint(toast.phase, line).bold());
        if let Some(url) = toast.hash.as_ref().and_then(|hash| self.chain.tx_url(hash)) {
            out.push_str(&format!("\n    {}", url.dimmed()));
        }
        if self.stderr {
            eprintln!("{}", out);
        } else {
            println!("{}", out);
        }
        tracing::debug!(%id, "toast shown");
    }

    fn dismiss(&self, id: &ToastId) {
        tracing::debug!(%id, "toast dismissed");
    }
}
