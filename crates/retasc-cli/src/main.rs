//! retasc CLI - command-line access to the Jira client.

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use retasc_core::config::Config;
use retasc_core::IssueFields;
use retasc_jira::{ApiUrls, JiraClient, RestJira};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retasc")]
#[command(author, version, about = "retasc - Jira issue client", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Jira instance URL (overrides config)
    #[arg(long, global = true, env = "JIRA_URL")]
    url: Option<String>,

    /// Jira personal access token or `user:password` (overrides config)
    #[arg(long, global = true, env = "JIRA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with issues
    Issue {
        #[command(subcommand)]
        command: IssueCommands,
    },

    /// Print REST endpoint URLs
    Url {
        #[command(subcommand)]
        command: UrlCommands,
    },

    /// Show the authenticated user
    Whoami,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum IssueCommands {
    /// Fetch a single issue
    Get {
        /// Issue key (e.g. RHELWF-123)
        key: String,
    },

    /// Search issues with JQL
    Search {
        /// JQL query
        jql: String,
    },

    /// Create an issue
    Create {
        /// Project key
        #[arg(long)]
        project: String,

        /// Issue summary
        #[arg(long)]
        summary: String,

        /// Issue description
        #[arg(long, default_value = "")]
        description: String,

        /// Issue type name
        #[arg(long = "type", default_value = "Story")]
        issue_type: String,

        /// Extra field as name=<json>, repeatable
        #[arg(long = "field", value_name = "NAME=JSON")]
        fields: Vec<String>,
    },

    /// Update fields of an issue
    Edit {
        /// Issue key
        key: String,

        /// Field as name=<json>, repeatable
        #[arg(long = "field", value_name = "NAME=JSON", required = true)]
        fields: Vec<String>,

        /// Do not notify watchers
        #[arg(long)]
        no_notify: bool,
    },
}

impl IssueCommands {
    fn name(&self) -> &'static str {
        match self {
            IssueCommands::Get { .. } => "issue get",
            IssueCommands::Search { .. } => "issue search",
            IssueCommands::Create { .. } => "issue create",
            IssueCommands::Edit { .. } => "issue edit",
        }
    }
}

#[derive(Subcommand)]
enum UrlCommands {
    /// Issue resource URL (collection URL without a key)
    Issue { key: Option<String> },
    /// Issue creation URL
    Create,
    /// Issue update URL
    Edit {
        key: String,
        #[arg(long)]
        no_notify: bool,
    },
    /// Example search URL
    Search,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set a value (e.g. `jira.url`)
    Set { key: String, value: String },
    /// Print a value
    Get { key: String },
    /// Show current configuration
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout is reserved for command output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("retasc - Jira issue client");
        println!("Run with --help for usage information");
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match command {
        Commands::Config { command } => run_config(command, config, cli.config.as_ref())?,
        Commands::Url { command } => {
            let (url, _) = connection(&config, cli.url, cli.token)?;
            let urls = ApiUrls::new(url);
            let out = match command {
                UrlCommands::Issue { key } => urls.issue(key.as_deref()),
                UrlCommands::Create => urls.create_issue(),
                UrlCommands::Edit { key, no_notify } => urls.edit_issue(&key, !no_notify),
                UrlCommands::Search => urls.search_example(),
            };
            println!("{}", out);
        }
        Commands::Whoami => {
            let (url, token) = connection(&config, cli.url, cli.token)?;
            let user = RestJira::new(url, token)?.myself().await?;
            print_json(&user)?;
        }
        Commands::Issue { command } => {
            let (url, token) = connection(&config, cli.url, cli.token)?;
            let span = tracing::info_span!("retasc", command = command.name());
            let client = JiraClient::new(url, token)?.with_span(span);
            run_issue(&client, command).await?;
        }
    }

    Ok(())
}

async fn run_issue(client: &JiraClient, command: IssueCommands) -> anyhow::Result<()> {
    match command {
        IssueCommands::Get { key } => {
            let issue = client.get_issue(&key).await?;
            print_json(&issue)?;
        }
        IssueCommands::Search { jql } => {
            let issues = client.search_issue(&jql).await?;
            print_json(&Value::Array(issues))?;
        }
        IssueCommands::Create {
            project,
            summary,
            description,
            issue_type,
            fields,
        } => {
            let extra = parse_fields(&fields)?;
            let issue = client
                .create_issue(&project, &summary, &description, &issue_type, Some(extra))
                .await?;
            print_json(&issue)?;
        }
        IssueCommands::Edit {
            key,
            fields,
            no_notify,
        } => {
            let fields = parse_fields(&fields)?;
            client.edit_issue(&key, fields, !no_notify).await?;
            tracing::info!("Updated {}", key);
        }
    }
    Ok(())
}

fn run_config(
    command: ConfigCommands,
    mut config: Config,
    path: Option<&PathBuf>,
) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Set { key, value } => {
            config.set(&key, &value)?;
            match path {
                Some(path) => config.save_to(path)?,
                None => config.save()?,
            }
        }
        ConfigCommands::Get { key } => {
            if let Some(value) = config.get(&key)? {
                println!("{}", value);
            }
        }
        ConfigCommands::Show => match &config.jira {
            Some(jira) => {
                println!("jira.url = {}", jira.url);
                if jira.token.is_some() {
                    println!("jira.token = (hidden)");
                }
            }
            None => println!("No configuration"),
        },
    }
    Ok(())
}

/// Resolve URL and token; flags and environment win over the config file.
fn connection(
    config: &Config,
    url: Option<String>,
    token: Option<String>,
) -> anyhow::Result<(String, Option<String>)> {
    let url = url
        .or_else(|| {
            config
                .jira
                .as_ref()
                .map(|j| j.url.clone())
                .filter(|u| !u.is_empty())
        })
        .ok_or_else(|| anyhow!("Jira URL not set; use --url, JIRA_URL or `config set jira.url`"))?;
    let token = token.or_else(|| config.jira.as_ref().and_then(|j| j.token.clone()));
    Ok((url, token))
}

/// Parse `name=<json>` pairs. Values that are not JSON are sent as strings.
fn parse_fields(pairs: &[String]) -> anyhow::Result<IssueFields> {
    let mut fields = IssueFields::new();
    for pair in pairs {
        let (name, raw) = pair
            .split_once('=')
            .with_context(|| format!("Invalid field '{}', expected NAME=JSON", pair))?;
        if name.is_empty() {
            return Err(anyhow!("Invalid field '{}', empty name", pair));
        }
        let value =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        fields.insert(name.to_string(), value);
    }
    Ok(fields)
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use retasc_core::config::JiraConfig;
    use serde_json::json;

    #[test]
    fn test_parse_fields_json_and_string() {
        let fields = parse_fields(&[
            r#"priority={"name": "Normal"}"#.to_string(),
            "labels=[\"a\",\"b\"]".to_string(),
            "summary=plain text".to_string(),
            "story_points=3".to_string(),
        ])
        .unwrap();

        assert_eq!(fields["priority"], json!({"name": "Normal"}));
        assert_eq!(fields["labels"], json!(["a", "b"]));
        assert_eq!(fields["summary"], json!("plain text"));
        assert_eq!(fields["story_points"], json!(3));
    }

    #[test]
    fn test_parse_fields_keeps_equals_in_value() {
        let fields = parse_fields(&["description=a=b".to_string()]).unwrap();
        assert_eq!(fields["description"], json!("a=b"));
    }

    #[test]
    fn test_parse_fields_invalid() {
        assert!(parse_fields(&["novalue".to_string()]).is_err());
        assert!(parse_fields(&["=1".to_string()]).is_err());
    }

    #[test]
    fn test_connection_precedence() {
        let config = Config {
            jira: Some(JiraConfig {
                url: "https://from-config".to_string(),
                token: Some("config-token".to_string()),
            }),
        };

        let (url, token) = connection(&config, None, None).unwrap();
        assert_eq!(url, "https://from-config");
        assert_eq!(token.as_deref(), Some("config-token"));

        let (url, token) =
            connection(&config, Some("https://flag".to_string()), Some("t".to_string())).unwrap();
        assert_eq!(url, "https://flag");
        assert_eq!(token.as_deref(), Some("t"));
    }

    #[test]
    fn test_connection_requires_url() {
        assert!(connection(&Config::default(), None, None).is_err());
    }

    #[test]
    fn test_cli_parses_create() {
        let cli = Cli::try_parse_from([
            "retasc",
            "--url",
            "https://jira.example.com",
            "issue",
            "create",
            "--project",
            "RHELWF",
            "--summary",
            "Title",
            "--field",
            r#"priority={"name":"Normal"}"#,
        ])
        .unwrap();

        if let Some(Commands::Issue { command }) = &cli.command {
            assert_eq!(command.name(), "issue create");
        }

        match cli.command {
            Some(Commands::Issue {
                command:
                    IssueCommands::Create {
                        project,
                        issue_type,
                        fields,
                        ..
                    },
            }) => {
                assert_eq!(project, "RHELWF");
                assert_eq!(issue_type, "Story");
                assert_eq!(fields.len(), 1);
            }
            _ => panic!("expected issue create"),
        }
    }
}
