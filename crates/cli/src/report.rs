use bera_txn::{
    collab::MemoryHistory,
    coordinator::{Session, TxnCoordinator},
    primitive::WritePrimitive,
    state::LifecycleState,
    types::{ContractWrite, ValueSend},
};
use colored::Colorize;
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
struct ModalRow {
    #[tabled(rename = "Modal")]
    title: &'static str,
    #[tabled(rename = "Open")]
    open: bool,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Link")]
    href: String,
}

pub(crate) fn render<W, V>(
    coordinator: &TxnCoordinator<W, V>,
    session: &Session,
    history: &MemoryHistory,
    json: bool,
) -> anyhow::Result<()>
where
    W: WritePrimitive<Request = ContractWrite>,
    V: WritePrimitive<Request = ValueSend>,
{
    let modals = session.modal_views(coordinator.chain());

    if json {
        let report = serde_json::json!({
            "session": session.summary(),
            "status": coordinator.status(session.operation()),
            "modals": modals,
            "history": history.entries(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let state = match session.state() {
        LifecycleState::Success { hash } => format!("success {}", hash).bright_green(),
        LifecycleState::Error { failure } => {
            format!("error ({:?}): {}", failure.kind(), failure.message).bright_red()
        },
        other => other.name().yellow(),
    };
    println!("\n{}", format!("**** {} [{}]", session.id(), session.operation()).bright_blue());
    println!("  {}\n", state.bold());

    let mut table = Table::new(modals.into_iter().map(|v| ModalRow {
        title: v.title,
        open: v.open,
        message: v.message,
        href: v.href.unwrap_or_default(),
    }));
    table.with(Style::sharp());
    println!("{}\n", table);

    if !history.is_empty() {
        println!("{}", "Recent transactions".bold().purple());
        println!("{:#}", history);
    }

    Ok(())
}
