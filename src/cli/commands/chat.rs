use tracing::info;

use crate::error::ChainPilotResult;

use super::{build_session, print_outcome};

pub async fn handle_chat(message: String) -> ChainPilotResult<()> {
    info!("Chat: {}", message);

    let mut session = build_session()?;
    let entry = session.submit_chat(&message).await;

    println!("🤖 {}", entry.text);
    if let Some(outcome) = &entry.outcome {
        print_outcome(outcome);
    }

    Ok(())
}
