//! Form-state controller for manual command entry.
//!
//! Owns the working draft for exactly one command variant. Selecting a
//! different variant replaces the draft wholesale with that variant's
//! registry defaults, so values typed under a previous variant can never
//! leak into a later submission.

use std::collections::BTreeMap;

use crate::error::{ChainPilotError, ChainPilotResult};

use super::{registry, AgentCommand, CommandKind};

#[derive(Debug, Clone)]
pub struct CommandForm {
    kind: CommandKind,
    draft: BTreeMap<String, String>,
}

impl CommandForm {
    pub fn new() -> Self {
        Self::with_kind(CommandKind::CreateErc20Token)
    }

    pub fn with_kind(kind: CommandKind) -> Self {
        Self {
            kind,
            draft: registry::defaults(kind),
        }
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Switch the form to another variant, discarding the current draft.
    pub fn select_kind(&mut self, kind: CommandKind) {
        self.kind = kind;
        self.draft = registry::defaults(kind);
    }

    /// Record a field value. The registry is the source of truth for which
    /// names exist on the current variant; values are not otherwise
    /// validated until [`CommandForm::build_command`].
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> ChainPilotResult<()> {
        if !self.draft.contains_key(name) {
            return Err(ChainPilotError::validation(format!(
                "Unknown field '{}' for {}",
                name, self.kind
            )));
        }
        self.draft.insert(name.to_string(), value.into());
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.draft.get(name).map(String::as_str)
    }

    /// Validate the draft against the registry and produce a command.
    pub fn build_command(&self) -> ChainPilotResult<AgentCommand> {
        AgentCommand::from_fields(self.kind, &self.draft)
    }
}

impl Default for CommandForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn fill_required(form: &mut CommandForm) {
        for spec in registry::fields(form.kind()) {
            if spec.required && form.field(spec.name).is_none_or(str::is_empty) {
                form.set_field(spec.name, format!("test-{}", spec.name)).unwrap();
            }
        }
    }

    #[test]
    fn built_command_fields_exactly_match_the_registry() {
        for kind in CommandKind::ALL {
            let mut form = CommandForm::with_kind(kind);
            for spec in registry::fields(kind) {
                form.set_field(spec.name, format!("value-{}", spec.name)).unwrap();
            }
            let value = serde_json::to_value(form.build_command().unwrap()).unwrap();
            let Value::Object(map) = value else {
                panic!("command must serialize to an object")
            };
            let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
            keys.retain(|k| *k != "kind");
            let mut expected: Vec<&str> =
                registry::fields(kind).iter().map(|f| f.name).collect();
            keys.sort_unstable();
            expected.sort_unstable();
            assert_eq!(keys, expected, "field set mismatch for {}", kind);
        }
    }

    #[test]
    fn selecting_another_variant_discards_the_draft() {
        let mut form = CommandForm::with_kind(CommandKind::MintErc721);
        form.set_field("tokenUri", "ipfs://QmStale").unwrap();
        form.select_kind(CommandKind::TransferNative);
        fill_required(&mut form);
        let value = serde_json::to_value(form.build_command().unwrap()).unwrap();
        assert!(value.get("tokenUri").is_none());
    }

    #[test]
    fn switching_back_restores_defaults_not_old_values() {
        let mut form = CommandForm::with_kind(CommandKind::SwapTokens);
        form.set_field("minOut", "999").unwrap();
        form.select_kind(CommandKind::TransferNative);
        form.select_kind(CommandKind::SwapTokens);
        assert_eq!(form.field("minOut"), Some("0"));
    }

    #[test]
    fn build_fails_while_a_required_field_is_blank() {
        let mut form = CommandForm::with_kind(CommandKind::TransferNative);
        form.set_field("to", "0xabc").unwrap();
        let err = form.build_command().unwrap_err();
        assert!(matches!(err, ChainPilotError::Validation(_)));

        form.set_field("amount", "10000000000000000").unwrap();
        assert!(form.build_command().is_ok());
    }

    #[test]
    fn whitespace_only_counts_as_blank() {
        let mut form = CommandForm::with_kind(CommandKind::TransferNative);
        form.set_field("to", "0xabc").unwrap();
        form.set_field("amount", "  \t ").unwrap();
        assert!(form.build_command().is_err());
    }

    #[test]
    fn unknown_field_is_rejected_for_the_current_variant() {
        let mut form = CommandForm::with_kind(CommandKind::TransferNative);
        let err = form.set_field("tokenOut", "0x1").unwrap_err();
        assert!(matches!(err, ChainPilotError::Validation(_)));
    }

    #[test]
    fn address_lookup_builds_with_no_fields() {
        let form = CommandForm::with_kind(CommandKind::GetAgentAddress);
        assert_eq!(form.build_command().unwrap(), AgentCommand::GetAgentAddress);
    }
}
