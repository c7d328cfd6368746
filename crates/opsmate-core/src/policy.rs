use crate::error::{OpsmateError, Result};

/// The five executor variants exposed to the reasoning layer. Each maps to
/// an allow-list of CLI action verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Create,
    Update,
    Delete,
    Describe,
    Get,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Create => "aws_cli_create_tool",
            ToolKind::Update => "aws_cli_update_tool",
            ToolKind::Delete => "aws_cli_delete_tool",
            ToolKind::Describe => "aws_cli_describe_tool",
            ToolKind::Get => "aws_cli_get_tool",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "aws_cli_create_tool" => Some(ToolKind::Create),
            "aws_cli_update_tool" => Some(ToolKind::Update),
            "aws_cli_delete_tool" => Some(ToolKind::Delete),
            "aws_cli_describe_tool" => Some(ToolKind::Describe),
            "aws_cli_get_tool" => Some(ToolKind::Get),
            _ => None,
        }
    }

    /// Whether commands from this variant mutate account state.
    pub fn is_mutating(&self) -> bool {
        matches!(self, ToolKind::Create | ToolKind::Update | ToolKind::Delete)
    }
}

// Verb allow-lists per variant. Hyphenated verbs match by prefix; bare verbs
// (the s3 high-level commands) match exactly.
const READ_PREFIXES: &[&str] = &["describe-", "get-", "list-", "lookup-", "search-"];
const READ_EXACT: &[&str] = &["ls", "help"];

const CREATE_PREFIXES: &[&str] = &[
    "create-", "run-", "allocate-", "put-", "add-", "register-", "request-", "import-",
];
const CREATE_EXACT: &[&str] = &["mb", "cp", "sync"];

const UPDATE_PREFIXES: &[&str] = &[
    "update-",
    "modify-",
    "put-",
    "set-",
    "attach-",
    "detach-",
    "associate-",
    "disassociate-",
    "enable-",
    "disable-",
    "tag-",
    "untag-",
    "start-",
    "stop-",
    "reboot-",
];
const UPDATE_EXACT: &[&str] = &[];

const DELETE_PREFIXES: &[&str] = &[
    "delete-",
    "terminate-",
    "remove-",
    "deregister-",
    "release-",
    "cancel-",
    "revoke-",
];
const DELETE_EXACT: &[&str] = &["rb", "rm"];

/// Validate a tokenized CLI command against the invoking variant's
/// allow-list.
///
/// Expects argv of the shape `aws <service> <action> [args…]`. The action
/// verb must match one of the variant's allowed verbs, and no token may
/// override `--profile` — profile selection belongs to the caller's request
/// context, never to the reasoning layer.
pub fn check(kind: ToolKind, argv: &[String]) -> Result<()> {
    if argv.first().map(String::as_str) != Some("aws") {
        return Err(OpsmateError::CommandRejected(
            "command must start with 'aws'".into(),
        ));
    }
    if argv.len() < 3 {
        return Err(OpsmateError::CommandRejected(
            "expected 'aws <service> <action>'".into(),
        ));
    }
    if let Some(tok) = argv
        .iter()
        .find(|t| t.as_str() == "--profile" || t.starts_with("--profile="))
    {
        return Err(OpsmateError::CommandRejected(format!(
            "'{tok}' may not be set by the tool"
        )));
    }

    let action = argv[2].as_str();
    let (prefixes, exact) = match kind {
        ToolKind::Create => (CREATE_PREFIXES, CREATE_EXACT),
        ToolKind::Update => (UPDATE_PREFIXES, UPDATE_EXACT),
        ToolKind::Delete => (DELETE_PREFIXES, DELETE_EXACT),
        ToolKind::Describe | ToolKind::Get => (READ_PREFIXES, READ_EXACT),
    };

    let allowed = prefixes.iter().any(|p| action.starts_with(p))
        || exact.contains(&action);
    if !allowed {
        return Err(OpsmateError::CommandRejected(format!(
            "action '{action}' is not permitted for {}",
            kind.name()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(cmd: &str) -> Vec<String> {
        cmd.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn get_variant_accepts_read_verbs() {
        assert!(check(ToolKind::Get, &argv("aws ec2 describe-instances")).is_ok());
        assert!(check(ToolKind::Get, &argv("aws s3 ls")).is_ok());
    }

    #[test]
    fn get_variant_rejects_mutation() {
        let err = check(ToolKind::Get, &argv("aws ec2 terminate-instances")).unwrap_err();
        assert!(matches!(err, OpsmateError::CommandRejected(_)));
    }

    #[test]
    fn create_variant_accepts_run_instances() {
        assert!(check(
            ToolKind::Create,
            &argv("aws ec2 run-instances --image-id ami-0bb84b8ffd87024d8")
        )
        .is_ok());
    }

    #[test]
    fn delete_variant_accepts_only_destructive_verbs() {
        assert!(check(ToolKind::Delete, &argv("aws ec2 terminate-instances --instance-ids i-1")).is_ok());
        assert!(check(ToolKind::Delete, &argv("aws ec2 run-instances")).is_err());
        assert!(check(ToolKind::Delete, &argv("aws s3 rb s3://my-bucket")).is_ok());
    }

    #[test]
    fn update_variant_accepts_modify() {
        assert!(check(
            ToolKind::Update,
            &argv("aws ec2 modify-instance-attribute --instance-id i-1")
        )
        .is_ok());
        assert!(check(ToolKind::Update, &argv("aws ec2 describe-instances")).is_err());
    }

    #[test]
    fn profile_override_is_rejected() {
        let err = check(
            ToolKind::Get,
            &argv("aws ec2 describe-instances --profile other"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("--profile"));
    }

    #[test]
    fn short_or_non_aws_commands_are_rejected() {
        assert!(check(ToolKind::Get, &argv("rm -rf /")).is_err());
        assert!(check(ToolKind::Get, &argv("aws ec2")).is_err());
    }

    #[test]
    fn mutating_classification() {
        assert!(ToolKind::Create.is_mutating());
        assert!(ToolKind::Delete.is_mutating());
        assert!(!ToolKind::Get.is_mutating());
        assert!(!ToolKind::Describe.is_mutating());
    }

    #[test]
    fn tool_name_round_trip() {
        for kind in [
            ToolKind::Create,
            ToolKind::Update,
            ToolKind::Delete,
            ToolKind::Describe,
            ToolKind::Get,
        ] {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("unknown_tool"), None);
    }
}
