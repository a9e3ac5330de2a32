//! SerDes binding commands.

use clap::Subcommand;

use super::session::Session;
use crate::error::Result;
use crate::output;

#[derive(Subcommand)]
pub enum SerDesCommand {
    /// Upload a file and immediately read it back, to sanity-check the file store
    Upload { file: std::path::PathBuf },

    /// Register a serializer/deserializer artifact, bind it to a schema id, and list the binding
    Bind {
        file: std::path::PathBuf,
        name: String,
        class_name: String,

        #[arg(long)]
        schema_metadata_id: i64,

        #[arg(long)]
        deserializer: bool,
    },
}

pub async fn execute(cmd: SerDesCommand, format: output::OutputFormat) -> Result<()> {
    match cmd {
        SerDesCommand::Upload { file } => upload(&file).await,
        SerDesCommand::Bind {
            file,
            name,
            class_name,
            schema_metadata_id,
            deserializer,
        } => bind(&file, &name, &class_name, schema_metadata_id, deserializer, format).await,
    }
}

async fn upload(file: &std::path::Path) -> Result<()> {
    let bytes = std::fs::read(file)?;
    let session = Session::new();
    let file_id = session.serdes.upload_file(bytes.clone()).await?;
    let round_tripped = session.serdes.download_file(&file_id).await?;

    if round_tripped == bytes {
        output::print_success(&format!("uploaded and verified {} bytes as {file_id}", bytes.len()));
    } else {
        output::print_warning("uploaded bytes did not round-trip");
    }
    Ok(())
}

async fn bind(
    file: &std::path::Path,
    name: &str,
    class_name: &str,
    schema_metadata_id: i64,
    deserializer: bool,
    format: output::OutputFormat,
) -> Result<()> {
    let bytes = std::fs::read(file)?;
    let session = Session::new();

    let file_id = session.serdes.upload_file(bytes).await?;
    let serdes_id = session
        .serdes
        .add_serdes_info(schema_registry_serdes::NewSerDesInfo {
            name: name.to_string(),
            class_name: class_name.to_string(),
            file_id,
            is_serializer: !deserializer,
        })
        .await?;
    session.serdes.map_serdes_with_schema(schema_metadata_id, serdes_id).await?;

    output::print_success(&format!("bound serdes {serdes_id} to schema {schema_metadata_id}"));

    let bindings = session.serdes.list_bindings(schema_metadata_id).await?;
    match format {
        output::OutputFormat::Table => {
            output::print_table(
                vec!["Id", "Name", "Class", "Role"],
                bindings
                    .iter()
                    .map(|b| {
                        vec![
                            b.id.to_string(),
                            b.name.clone(),
                            b.class_name.clone(),
                            if b.is_serializer { "serializer" } else { "deserializer" }.to_string(),
                        ]
                    })
                    .collect(),
            );
        }
        _ => output::print(&bindings, format)?,
    }
    Ok(())
}
