use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use medi_diagnosis::codes::table_for;
use medi_diagnosis::{
    encode_diabetes, encode_heart_checked, validate_diabetes, validate_heart, CategoryPolicy,
    DiabetesInput, Diagnosis, DiagnosisError, DiagnosisKind, DiagnosisReport, HeartInput,
    InferenceService, MessageStyle, RangeViolation, ServiceConfig,
};
use serde_json::json;

const EXIT_OK: i32 = 0;
const EXIT_REQUEST: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_UNAVAILABLE: i32 = 3;
/// The result could not be serialized or written to stdout.
const EXIT_OUTPUT: i32 = 4;

#[derive(Debug, Parser)]
#[command(
    name = "medi-diagnose",
    version,
    author = "MediLang Team",
    about = "Heart disease and diabetes risk prediction from clinical inputs",
    long_about = "medi-diagnose encodes a clinical record into the feature vector a \
        pre-trained classifier expects, runs the classifier, and prints the verdict.\n\n\
        Records are JSON objects read from --input or stdin.\n\n\
        EXAMPLES:\n\
        \n  medi-diagnose health\n\
        \n  medi-diagnose predict heart --input patient.json\n\
        \n  cat labs.json | medi-diagnose predict diabetes\n\
        \n  medi-diagnose report heart --name 'Jane Doe' -i patient.json\n\
        \n  medi-diagnose report diabetes --text -i labs.json\n\
        \n  medi-diagnose encode heart -i patient.json"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON service configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Heart model artifact (overrides config and MEDI_HEART_MODEL)
    #[arg(long, global = true)]
    heart_model: Option<PathBuf>,

    /// Diabetes model artifact (overrides config and MEDI_DIABETES_MODEL)
    #[arg(long, global = true)]
    diabetes_model: Option<PathBuf>,

    /// Reject records with unrecognized categorical values
    #[arg(long, global = true)]
    strict: bool,

    /// Use full-sentence verdict messages
    #[arg(long, global = true)]
    sentence: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load both models and report their status
    Health,
    /// Predict a verdict for one record
    Predict(RequestArgs),
    /// Print the encoded feature vector without running a model
    Encode(RequestArgs),
    /// Predict and print the data for a printable report
    Report(ReportArgs),
}

#[derive(Debug, Args)]
struct RequestArgs {
    /// Diagnosis type: heart or diabetes
    kind: DiagnosisKind,

    /// JSON record file; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ReportArgs {
    #[command(flatten)]
    request: RequestArgs,

    /// Patient name shown on the report
    #[arg(long)]
    name: Option<String>,

    /// Print the report as plain text instead of JSON
    #[arg(long)]
    text: bool,
}

/// A parsed input record of either kind
#[derive(Debug)]
enum Record {
    Heart(HeartInput),
    Diabetes(DiabetesInput),
}

impl Record {
    fn parse(kind: DiagnosisKind, source: &str) -> Result<Self, String> {
        match kind {
            DiagnosisKind::Heart => serde_json::from_str(source)
                .map(Record::Heart)
                .map_err(|e| format!("invalid heart record: {e}")),
            DiagnosisKind::Diabetes => serde_json::from_str(source)
                .map(Record::Diabetes)
                .map_err(|e| format!("invalid diabetes record: {e}")),
        }
    }

    fn validate(&self) -> Result<(), Vec<RangeViolation>> {
        match self {
            Record::Heart(r) => validate_heart(r),
            Record::Diabetes(r) => validate_diabetes(r),
        }
    }

    fn diagnose(&self, svc: &InferenceService) -> Result<Diagnosis, DiagnosisError> {
        match self {
            Record::Heart(r) => svc.diagnose_heart(r),
            Record::Diabetes(r) => svc.diagnose_diabetes(r),
        }
    }

    fn report(&self, name: Option<&str>, diagnosis: &Diagnosis) -> DiagnosisReport {
        match self {
            Record::Heart(r) => DiagnosisReport::heart(name, r, diagnosis),
            Record::Diabetes(r) => DiagnosisReport::diabetes(name, r, diagnosis),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

fn resolve_config(cli: &Cli) -> Result<ServiceConfig, DiagnosisError> {
    let mut config = match &cli.config {
        Some(path) => ServiceConfig::from_json_file(path)?,
        None => ServiceConfig::default(),
    };
    config.apply_env()?;
    if let Some(p) = &cli.heart_model {
        config.heart_model = p.clone();
    }
    if let Some(p) = &cli.diabetes_model {
        config.diabetes_model = p.clone();
    }
    if cli.strict {
        config.category_policy = CategoryPolicy::Strict;
    }
    if cli.sentence {
        config.message_style = MessageStyle::Sentence;
    }
    log::debug!("resolved config: {config:?}");
    Ok(config)
}

fn read_source_from_input(input: &Option<PathBuf>) -> Result<String, String> {
    if let Some(path) = input {
        fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read from stdin: {e}"))?;
        Ok(buf)
    }
}

fn load_record(args: &RequestArgs) -> Result<Record, String> {
    let source = read_source_from_input(&args.input)?;
    Record::parse(args.kind, &source)
}

fn load_service(config: &ServiceConfig) -> Result<InferenceService, i32> {
    InferenceService::from_config(config).map_err(|e| {
        eprintln!("error: {e}");
        EXIT_UNAVAILABLE
    })
}

fn exit_code_for(err: &DiagnosisError) -> i32 {
    if err.is_request_error() {
        EXIT_REQUEST
    } else {
        EXIT_UNAVAILABLE
    }
}

fn write_json(out: &mut dyn Write, value: &impl serde::Serialize) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(s) => match writeln!(out, "{s}") {
            Ok(()) => EXIT_OK,
            Err(e) => {
                eprintln!("error: failed to write output: {e}");
                EXIT_OUTPUT
            }
        },
        Err(e) => {
            eprintln!("error: failed to serialize output: {e}");
            EXIT_OUTPUT
        }
    }
}

fn run_health(config: &ServiceConfig, out: &mut dyn Write) -> i32 {
    match load_service(config) {
        Ok(svc) => write_json(out, &svc.health()),
        Err(rc) => rc,
    }
}

fn run_encode(record: &Record, out: &mut dyn Write) -> i32 {
    let body = match record {
        Record::Heart(r) => {
            let encoded = encode_heart_checked(r);
            json!({
                "kind": DiagnosisKind::Heart,
                "fully_mapped": encoded.is_fully_mapped(),
                "features": encoded.vector,
                "unmapped": encoded.unmapped,
            })
        }
        Record::Diabetes(r) => json!({
            "kind": DiagnosisKind::Diabetes,
            "fully_mapped": true,
            "features": encode_diabetes(r),
            "unmapped": [],
        }),
    };
    write_json(out, &body)
}

/// Validate, load the models, and diagnose. Errors are reported on stderr.
fn diagnose(config: &ServiceConfig, record: &Record) -> Result<Diagnosis, i32> {
    if let Err(violations) = record.validate() {
        for v in &violations {
            eprintln!("error: {v}");
        }
        return Err(EXIT_INPUT);
    }
    let svc = load_service(config)?;
    let diagnosis = record.diagnose(&svc).map_err(|e| {
        eprintln!("error: {e}");
        exit_code_for(&e)
    })?;
    for miss in &diagnosis.unmapped {
        let accepted = table_for(miss.field)
            .map(|t| t.labels().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        eprintln!(
            "warning: {} value {:?} is not recognized; encoded as -1 (accepted: {accepted})",
            miss.field, miss.value
        );
    }
    Ok(diagnosis)
}

fn run_predict(config: &ServiceConfig, record: &Record, out: &mut dyn Write) -> i32 {
    match diagnose(config, record) {
        Ok(d) => write_json(out, &d.interpretation),
        Err(rc) => rc,
    }
}

fn run_report(
    config: &ServiceConfig,
    record: &Record,
    name: Option<&str>,
    text: bool,
    out: &mut dyn Write,
) -> i32 {
    let d = match diagnose(config, record) {
        Ok(d) => d,
        Err(rc) => return rc,
    };
    let report = record.report(name, &d);
    if text {
        return match write!(out, "{}", report.to_text()) {
            Ok(()) => EXIT_OK,
            Err(e) => {
                eprintln!("error: failed to write output: {e}");
                EXIT_OUTPUT
            }
        };
    }
    write_json(
        out,
        &json!({
            "file_name": report.file_name(),
            "color_hex": report.color.hex(),
            "report": report,
        }),
    )
}

fn run_cli(cli: Cli) -> i32 {
    init_logging(cli.verbose);

    let config = match resolve_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return EXIT_INPUT;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Health => run_health(&config, &mut out),
        Command::Predict(args) | Command::Encode(args) => {
            let record = match load_record(args) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("error: {e}");
                    return EXIT_INPUT;
                }
            };
            if matches!(cli.command, Command::Encode(_)) {
                run_encode(&record, &mut out)
            } else {
                run_predict(&config, &record, &mut out)
            }
        }
        Command::Report(args) => {
            let record = match load_record(&args.request) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("error: {e}");
                    return EXIT_INPUT;
                }
            };
            run_report(
                &config,
                &record,
                args.name.as_deref(),
                args.text,
                &mut out,
            )
        }
    }
}

fn main() {
    std::process::exit(run_cli(Cli::parse()));
}
