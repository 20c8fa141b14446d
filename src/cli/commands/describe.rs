use crate::command::{registry, CommandKind};
use crate::error::ChainPilotResult;

pub async fn handle_describe(kind: Option<String>) -> ChainPilotResult<()> {
    let kinds: Vec<CommandKind> = match kind {
        Some(raw) => vec![raw.parse()?],
        None => CommandKind::ALL.to_vec(),
    };

    for kind in kinds {
        println!("{}", kind.label());
        println!("  {}", registry::description(kind));
        for spec in registry::fields(kind) {
            let marker = if spec.required { "*" } else { " " };
            let default = if spec.default.is_empty() {
                String::new()
            } else {
                format!(" [default: {}]", spec.default)
            };
            println!(
                "  {}{:<16} {} (e.g. {}){}",
                marker, spec.name, spec.label, spec.placeholder, default
            );
        }
        if kind != CommandKind::GetAgentAddress {
            println!("  Gas: {}", registry::gas_hint(kind));
        }
        println!();
    }

    Ok(())
}
