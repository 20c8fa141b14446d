use crate::command::AgentCommand;
use crate::error::ChainPilotResult;

use super::{build_session, print_outcome};

pub async fn handle_address() -> ChainPilotResult<()> {
    let mut session = build_session()?;
    let outcome = session.submit_command(AgentCommand::GetAgentAddress).await;
    print_outcome(&outcome);
    Ok(())
}
