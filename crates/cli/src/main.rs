use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brgy_core::{
    load_resident, resolve_reference_data_dir, select_schema, CertificateError,
    CertificateSession, Clock, FieldName, FixedClock, Narrative, PersonSlot, ReferenceConfig,
    ReferenceData, SystemClock, YamlDirectoryProvider,
};
use brgy_types::{CertificateType, CertificateTypeId, NonEmptyText};

const DEFAULT_JURISDICTION: &str = "default";

#[derive(Parser)]
#[command(name = "brgy")]
#[command(about = "Barangay certificate narrative composer")]
struct Cli {
    /// Reference data directory (overrides BRGY_REFERENCE_DATA_DIR)
    #[arg(long, global = true)]
    reference_data_dir: Option<PathBuf>,
    /// Jurisdiction whose officials are loaded (overrides BRGY_JURISDICTION)
    #[arg(long, global = true)]
    jurisdiction: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List certificate types
    Types,
    /// List the fields collected for a certificate type name
    Fields {
        /// Certificate type display name
        name: String,
    },
    /// Compose a certificate narrative
    Compose {
        /// Certificate type id
        certificate_type: String,
        /// Form field value as name=value (repeatable)
        #[arg(long = "field", value_parser = parse_field_arg)]
        fields: Vec<(String, String)>,
        /// Resident record (YAML) to use as the complainant
        #[arg(long)]
        complainant: Option<PathBuf>,
        /// Resident record (YAML) for the applicant
        #[arg(long)]
        applicant: Option<PathBuf>,
        /// Resident record (YAML) for the mother
        #[arg(long)]
        mother: Option<PathBuf>,
        /// Resident record (YAML) for the father
        #[arg(long)]
        father: Option<PathBuf>,
        /// Resident record (YAML) for the person the certificate is issued to
        #[arg(long)]
        issued_to: Option<PathBuf>,
        /// Resident record (YAML) for the partner
        #[arg(long)]
        partner: Option<PathBuf>,
        /// Issue date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Markdown,
    Plain,
    Json,
}

fn parse_field_arg(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

/// Entry point for the `brgy` CLI.
///
/// # Environment Variables
/// - `BRGY_REFERENCE_DATA_DIR`: reference data directory (default: search for `reference_data/`)
/// - `BRGY_JURISDICTION`: jurisdiction whose officials are loaded (default: "default")
/// - `RUST_LOG`: log filter (default directive: `brgy=info`)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("brgy=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Types) => {
            let cfg = load_config(cli.reference_data_dir, cli.jurisdiction)?;
            let reference = fetch_reference(&cfg).await?;
            if reference.certificate_types.is_empty() {
                println!("No certificate types found.");
            }
            for certificate_type in &reference.certificate_types {
                println!("{}\t{}", certificate_type.id, certificate_type.name);
            }
        }
        Some(Commands::Fields { name }) => {
            let certificate_type = CertificateType {
                id: CertificateTypeId::new(""),
                name: NonEmptyText::new(&name).context("certificate type name")?,
                template: String::new(),
            };
            let selection = select_schema(&certificate_type);
            println!("Common fields:");
            for field in FieldName::COMMON {
                println!("  {field}");
            }
            println!("Extra fields ({:?}):", selection.kind);
            if selection.required_extra_fields.is_empty() {
                println!("  (none)");
            }
            for field in &selection.required_extra_fields {
                match field.choices() {
                    Some(choices) => println!("  {field} [{}]", choices.join(", ")),
                    None => println!("  {field}"),
                }
            }
        }
        Some(Commands::Compose {
            certificate_type,
            fields,
            complainant,
            applicant,
            mother,
            father,
            issued_to,
            partner,
            date,
            format,
        }) => {
            let cfg = load_config(cli.reference_data_dir, cli.jurisdiction)?;
            let clock = FixedClock(date.unwrap_or_else(|| SystemClock.today()));
            let provider = YamlDirectoryProvider::new(cfg.reference_data_dir());

            let mut session =
                match CertificateSession::start(&provider, cfg.jurisdiction(), clock).await {
                    Ok(session) => session,
                    Err(e @ CertificateError::ReferenceDataUnavailable(_)) => {
                        tracing::warn!(error = %e, "composing without reference data");
                        CertificateSession::with_clock(ReferenceData::default(), clock)
                    }
                    Err(e) => return Err(e.into()),
                };

            // Without reference data there is no type to select; the narrative is the prompt.
            if !session.reference().certificate_types.is_empty() {
                session.select_certificate_type(&CertificateTypeId::new(certificate_type))?;
            }

            if let Some(path) = complainant {
                session.select_complainant(&read_resident(&path).await?);
            }
            let people = [
                (PersonSlot::Applicant, applicant),
                (PersonSlot::Mother, mother),
                (PersonSlot::Father, father),
                (PersonSlot::IssuedTo, issued_to),
                (PersonSlot::Partner, partner),
            ];
            for (slot, path) in people {
                if let Some(path) = path {
                    session.select_person(slot, &read_resident(&path).await?);
                }
            }
            if session.form().certificate_type().is_some() {
                for (name, value) in fields {
                    session
                        .update_field_by_name(&name, value)
                        .with_context(|| format!("setting field '{name}'"))?;
                }
            }

            print_narrative(session.narrative(), format)?;
        }
        None => {
            println!("Use 'brgy --help' for commands");
        }
    }

    Ok(())
}

fn load_config(
    reference_data_dir: Option<PathBuf>,
    jurisdiction: Option<String>,
) -> anyhow::Result<ReferenceConfig> {
    let override_dir = reference_data_dir
        .or_else(|| std::env::var("BRGY_REFERENCE_DATA_DIR").ok().map(PathBuf::from));
    let dir = resolve_reference_data_dir(override_dir)?;
    let jurisdiction = jurisdiction
        .or_else(|| std::env::var("BRGY_JURISDICTION").ok())
        .unwrap_or_else(|| DEFAULT_JURISDICTION.into());

    tracing::debug!(dir = %dir.display(), %jurisdiction, "reference data config");
    Ok(ReferenceConfig::new(dir, jurisdiction)?)
}

async fn fetch_reference(cfg: &ReferenceConfig) -> anyhow::Result<ReferenceData> {
    let provider = YamlDirectoryProvider::new(cfg.reference_data_dir());
    Ok(ReferenceData::fetch(&provider, cfg.jurisdiction()).await?)
}

async fn read_resident(path: &Path) -> anyhow::Result<brgy_types::Resident> {
    load_resident(path)
        .await
        .with_context(|| format!("loading resident record {}", path.display()))
}

fn print_narrative(narrative: &Narrative, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Markdown => println!("{}", narrative.to_markdown()),
        OutputFormat::Plain => println!("{}", narrative.plain_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(narrative)?),
    }
    Ok(())
}
