//! Schema management commands.

use clap::Subcommand;
use schema_registry_providers::SchemaProvider;
use serde_json::json;

use super::session::{providers, Session};
use super::util::{parse_policy, read_content};
use crate::{error::Result, output};

#[derive(Subcommand)]
pub enum SchemaCommand {
    /// Parse and fingerprint a schema without registering it
    Validate {
        /// Schema text, or a path to a file containing it
        content: String,

        /// Dialect tag (avro, json-schema)
        #[arg(short = 't', long, default_value = "avro")]
        schema_type: String,
    },

    /// List the (name, namespace, type) fields a schema text would index
    Fields {
        content: String,

        #[arg(short = 't', long, default_value = "avro")]
        schema_type: String,
    },

    /// Check whether a candidate is compatible with an existing text under a policy
    Compatible {
        /// The prior schema text, or a path to a file containing it
        against: String,

        /// The candidate schema text, or a path to a file containing it
        candidate: String,

        #[arg(short = 't', long, default_value = "avro")]
        schema_type: String,

        #[arg(short, long, default_value = "BACKWARD")]
        policy: String,
    },

    /// Register a schema's first version within a throwaway session
    Register {
        name: String,

        /// Schema text, or a path to a file containing it
        content: String,

        #[arg(short = 't', long, default_value = "avro")]
        schema_type: String,

        #[arg(short, long, default_value = "default")]
        group: String,

        #[arg(short, long, default_value = "BACKWARD")]
        policy: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },
}

pub async fn execute(cmd: SchemaCommand, format: output::OutputFormat) -> Result<()> {
    match cmd {
        SchemaCommand::Validate { content, schema_type } => validate(&content, &schema_type),
        SchemaCommand::Fields { content, schema_type } => fields(&content, &schema_type, format),
        SchemaCommand::Compatible {
            against,
            candidate,
            schema_type,
            policy,
        } => compatible(&against, &candidate, &schema_type, &policy),
        SchemaCommand::Register {
            name,
            content,
            schema_type,
            group,
            policy,
            description,
        } => register(&name, &content, &schema_type, &group, &policy, &description).await,
    }
}

fn validate(content: &str, schema_type: &str) -> Result<()> {
    let text = read_content(content)?;
    let provider = providers().get(schema_type)?;
    let fingerprint = hex::encode(provider.fingerprint(&text)?);
    output::print_success(&format!("{schema_type} schema is valid"));
    output::print_info(&format!("fingerprint: {fingerprint}"));
    Ok(())
}

fn fields(content: &str, schema_type: &str, format: output::OutputFormat) -> Result<()> {
    let text = read_content(content)?;
    let provider = providers().get(schema_type)?;
    let fields = provider.generate_fields(&text)?;

    match format {
        output::OutputFormat::Table => {
            output::print_table(
                vec!["Name", "Namespace", "Type"],
                fields
                    .iter()
                    .map(|f| vec![f.name.clone(), f.namespace.clone().unwrap_or_default(), f.field_type.clone()])
                    .collect(),
            );
        }
        _ => output::print(&fields, format)?,
    }
    Ok(())
}

fn compatible(against: &str, candidate: &str, schema_type: &str, policy: &str) -> Result<()> {
    let existing = read_content(against)?;
    let candidate = read_content(candidate)?;
    let policy = parse_policy(policy)?;
    let provider = providers().get(schema_type)?;

    if provider.is_compatible(&candidate, &[existing], policy)? {
        output::print_success(&format!("compatible under {policy}"));
    } else {
        output::print_warning(&format!("not compatible under {policy}"));
    }
    Ok(())
}

async fn register(name: &str, content: &str, schema_type: &str, group: &str, policy: &str, description: &str) -> Result<()> {
    let text = read_content(content)?;
    let policy = parse_policy(policy)?;
    let session = Session::new();

    let meta = schema_registry_engine::NewSchemaMetadata {
        name: name.to_string(),
        schema_type: schema_type.to_string(),
        group: group.to_string(),
        compatibility: policy,
        description: description.to_string(),
    };
    let version = session.engine.add_schema_version_for_metadata(meta, &text, description).await?;
    let info = session.engine.get_schema_version_info(name, version).await?;

    output::print_success(&format!("registered {name} v{version}"));
    output::print(&json!({
        "name": name,
        "version": version,
        "fingerprint": info.fingerprint,
        "policy": policy.to_string(),
    }), output::OutputFormat::Json)
}
