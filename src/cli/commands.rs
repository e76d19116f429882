use crate::{
    cli::args::{DeriveArgs, ParamArgs, ParamCommand},
    core::{
        create_command, CommandDescriptor, ConfigLoader, DyncmdConfig, ParameterMap,
        WorkflowInstanceSnapshot,
    },
    utils::serialization::{FileSerializer, FileUtils, JsonSerializer, Serializer},
    Result,
};
use anyhow::{anyhow, Context};
use chrono::Utc;
use std::{
    env,
    io::Write,
    path::{Path, PathBuf},
};

/// Handles `dyncmd derive`.
pub fn derive(args: DeriveArgs) -> Result<()> {
    let workspace = match args.workspace.clone() {
        Some(path) => path,
        None => env::current_dir().context("failed to resolve current directory")?,
    };
    let config = ConfigLoader::load_from_workspace(&workspace)?;
    let serializer = JsonSerializer::new(config.output.pretty);

    let snapshot: WorkflowInstanceSnapshot = FileUtils
        .load_from_file(&args.instance, &serializer)
        .context("failed to load workflow instance snapshot")?;

    let mut parameters = ParameterMap::new();
    if let Some(path) = &args.params_file {
        let from_file: ParameterMap = FileUtils
            .load_from_file(path, &serializer)
            .context("failed to load caller parameters")?;
        parameters.extend(from_file);
    }
    parameters.extend(args.params);

    let command = create_command(
        &snapshot,
        args.definition_code,
        args.definition_version,
        parameters,
    )?;

    match output_path(args.out.as_deref(), &config, &workspace, &command) {
        Some(path) => {
            FileUtils.save_to_file(&path, &command, &serializer)?;
            tracing::info!(
                path = %path.display(),
                command_type = %command.command_type,
                definition_code = command.workflow_definition_code,
                definition_version = command.workflow_definition_version,
                "wrote derived command"
            );
        }
        None => {
            let bytes = serializer.serialize(&command)?;
            std::io::stdout()
                .write_all(&bytes)
                .context("failed to write command to stdout")?;
            tracing::info!(
                command_type = %command.command_type,
                definition_code = command.workflow_definition_code,
                definition_version = command.workflow_definition_version,
                "derived command"
            );
        }
    }

    Ok(())
}

/// Handles `dyncmd param ...` subcommands for reading and writing command metadata.
pub fn param(args: ParamArgs) -> Result<()> {
    let workspace = env::current_dir().context("failed to resolve current directory")?;
    let config = ConfigLoader::load_from_workspace(&workspace)?;
    let serializer = JsonSerializer::new(config.output.pretty);

    match args.command {
        ParamCommand::Get { file, key } => {
            let command = load_command(&file, &serializer)?;
            let value = command
                .command_param_value(&key)
                .ok_or_else(|| anyhow!("metadata key '{}' is not set in {}", key, file.display()))?;
            println!("{}", value);
        }
        ParamCommand::Set { file, key, value } => {
            let mut command = load_command(&file, &serializer)?;
            command.put_command_param(key.as_str(), value);
            command.update_time = Utc::now();
            FileUtils.save_to_file(&file, &command, &serializer)?;
            tracing::info!(path = %file.display(), key = %key, "updated command metadata");
        }
        ParamCommand::List { file } => {
            let command = load_command(&file, &serializer)?;
            for (key, value) in command.command_params().iter() {
                match value.as_str() {
                    Some(text) => println!("{}={}", key, text),
                    None => println!("{}={}", key, value),
                }
            }
        }
    }

    Ok(())
}

fn load_command(path: &Path, serializer: &JsonSerializer) -> Result<CommandDescriptor> {
    FileUtils
        .load_from_file(path, serializer)
        .with_context(|| format!("failed to load command {}", path.display()))
}

fn output_path(
    out: Option<&Path>,
    config: &DyncmdConfig,
    workspace: &Path,
    command: &CommandDescriptor,
) -> Option<PathBuf> {
    if let Some(out) = out {
        return Some(out.to_path_buf());
    }
    let dir = config.output.dir.as_ref()?;
    let dir = if dir.is_absolute() {
        dir.clone()
    } else {
        workspace.join(dir)
    };
    Some(dir.join(format!(
        "{}-{}.json",
        command.workflow_definition_code, command.workflow_definition_version
    )))
}
