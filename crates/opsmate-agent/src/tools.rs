use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use opsmate_core::{CliExecutor, CommandOutcome, ToolKind};

/// Metadata for one executor variant as presented to the model.
#[derive(Debug, Clone)]
pub struct ToolSpecDef {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON schema of the tool's input object.
    pub schema: serde_json::Value,
}

/// Input accepted by every tool variant. Only the get variant honours
/// `additional_args`.
#[derive(Debug, Deserialize)]
struct ToolInput {
    aws_cli_command: String,
    #[serde(default)]
    additional_args: Option<String>,
}

fn command_schema(command_description: &str) -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "aws_cli_command": {
                "type": "string",
                "description": command_description,
            }
        },
        "required": ["aws_cli_command"]
    })
}

/// The five AWS CLI tool variants offered to the reasoning layer. The
/// descriptions steer which variant the model picks per intent; the policy
/// layer enforces the split mechanically.
pub fn tool_specs() -> Vec<ToolSpecDef> {
    vec![
        ToolSpecDef {
            name: ToolKind::Create.name(),
            description: "Handles AWS create commands. Use AWS CLI format like \
                          'aws ec2 run-instances ...' to create resources.",
            schema: command_schema("AWS CLI command to create resources, e.g. 'aws ec2 run-instances ...'"),
        },
        ToolSpecDef {
            name: ToolKind::Update.name(),
            description: "Handles AWS update commands. Use AWS CLI format like \
                          'aws ec2 modify-instance-attribute ...' to change existing resources.",
            schema: command_schema("AWS CLI command to update resources"),
        },
        ToolSpecDef {
            name: ToolKind::Delete.name(),
            description: "Handles AWS delete commands. Use AWS CLI format like \
                          'aws ec2 terminate-instances ...' to remove resources.",
            schema: command_schema("AWS CLI command to delete resources"),
        },
        ToolSpecDef {
            name: ToolKind::Describe.name(),
            description: "Describes resources in the AWS account. Use AWS CLI format like \
                          'aws ec2 describe-instances'.",
            schema: command_schema("AWS CLI command to describe resources"),
        },
        ToolSpecDef {
            name: ToolKind::Get.name(),
            description: "Retrieves data from the AWS account using AWS CLI commands. \
                          Use the format 'aws <command> <subcommand> [parameters]'.",
            schema: json!({
                "type": "object",
                "properties": {
                    "aws_cli_command": {
                        "type": "string",
                        "description": "AWS CLI command to retrieve data, e.g. 'ec2 describe-instances'",
                    },
                    "additional_args": {
                        "type": "string",
                        "description": "Additional arguments to pass to the AWS CLI command",
                    }
                },
                "required": ["aws_cli_command"]
            }),
        },
    ]
}

/// Execute one tool call under the caller's profile.
///
/// Every failure mode — unknown tool, malformed input, policy rejection,
/// spawn failure, non-zero exit — comes back as an `error` outcome; the
/// model relays it to the user in natural language.
pub async fn dispatch(
    executor: &CliExecutor,
    name: &str,
    input: &serde_json::Value,
    profile: &str,
) -> CommandOutcome {
    let Some(kind) = ToolKind::from_name(name) else {
        warn!(tool = name, "model requested unknown tool");
        return CommandOutcome::error(format!("unknown tool: {name}"));
    };

    let input: ToolInput = match serde_json::from_value(input.clone()) {
        Ok(i) => i,
        Err(e) => return CommandOutcome::error(format!("invalid tool input: {e}")),
    };

    let additional_args = match kind {
        ToolKind::Get => input.additional_args.as_deref(),
        _ => None,
    };

    match executor
        .run(kind, &input.aws_cli_command, additional_args, profile)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => CommandOutcome::error(e.to_string()),
    }
}
