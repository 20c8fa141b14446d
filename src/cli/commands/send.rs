use tracing::info;

use crate::command::{CommandForm, CommandKind};
use crate::error::{ChainPilotError, ChainPilotResult};

use super::{build_session, print_outcome};

pub async fn handle_send(kind: String, fields: Vec<String>) -> ChainPilotResult<()> {
    let kind: CommandKind = kind.parse()?;
    info!("Manual command: {}", kind);

    let mut form = CommandForm::with_kind(kind);
    for pair in &fields {
        let (name, value) = pair.split_once('=').ok_or_else(|| {
            ChainPilotError::invalid_input(format!("Expected NAME=VALUE, got '{}'", pair))
        })?;
        form.set_field(name, value)?;
    }
    let command = form.build_command()?;

    let mut session = build_session()?;
    let outcome = session.submit_command(command).await;
    print_outcome(&outcome);

    Ok(())
}
