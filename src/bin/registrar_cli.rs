//! Registrar CLI - Document Issuance Front-End
//!
//! Commands: families, validate, issue, demo
//! Outputs JSON to stdout (demo prints the document itself)
//! Returns exit code 2 on validation failure

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use registrar_core::{
    clock::FixedClock,
    pipeline::{IssuancePipeline, IssueRequest},
    student::Student,
    templates::{RequestType, TemplateRegistry},
};

#[derive(Parser)]
#[command(name = "registrar-cli")]
#[command(about = "Registrar CLI - Document Issuance Engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Pin the issue date (YYYY-MM-DD) instead of reading the host clock
    #[arg(long, global = true)]
    date: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered document families
    Families,

    /// Validate a student against a family's rules
    Validate {
        /// Request type (ENROLLMENT or TRANSCRIPT)
        #[arg(short, long)]
        request_type: String,

        /// JSON payload (Student)
        #[arg(short, long)]
        payload: String,
    },

    /// Issue a document
    Issue {
        /// Request type (ENROLLMENT or TRANSCRIPT)
        #[arg(short, long)]
        request_type: String,

        /// JSON payload (Student)
        #[arg(short, long)]
        payload: String,
    },

    /// Run the canonical illustrative issuance (UCC-0042, transcript)
    Demo,
}

fn parse_request_type(raw: &str) -> Option<RequestType> {
    match raw.to_ascii_uppercase().as_str() {
        "ENROLLMENT" => Some(RequestType::Enrollment),
        "TRANSCRIPT" => Some(RequestType::Transcript),
        _ => None,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let registry = TemplateRegistry::builtin();
    let pipeline = match cli.date {
        Some(date) => IssuancePipeline::with_clock(registry, Box::new(FixedClock(date))),
        None => IssuancePipeline::new(registry),
    };

    match cli.command {
        Commands::Families => {
            let families: Vec<_> = pipeline
                .list_families()
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "requestType": t.request_type,
                        "title": t.title,
                        "stampPrefix": t.stamp_prefix,
                        "version": t.template_version,
                    })
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&families).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Validate { request_type, payload } => {
            let Some(request_type) = parse_request_type(&request_type) else {
                eprintln!(r#"{{"valid": false, "error": "Unknown request type: {request_type}"}}"#);
                return ExitCode::FAILURE;
            };

            let student: Student = match serde_json::from_str(&payload) {
                Ok(s) => s,
                Err(e) => {
                    println!(r#"{{"valid": false, "error": "Invalid payload: {e}"}}"#);
                    return ExitCode::FAILURE;
                }
            };

            match pipeline.validate_student(request_type, &student) {
                Ok(result) => {
                    println!("{}", serde_json::to_string_pretty(&result).unwrap());
                    if result.valid {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::from(2) // Validation failure
                    }
                }
                Err(e) => {
                    println!(r#"{{"valid": false, "error": "{e}"}}"#);
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Issue { request_type, payload } => {
            let Some(request_type) = parse_request_type(&request_type) else {
                eprintln!(r#"{{"success": false, "error": "Unknown request type: {request_type}"}}"#);
                return ExitCode::FAILURE;
            };

            let student: Student = match serde_json::from_str(&payload) {
                Ok(s) => s,
                Err(e) => {
                    println!(r#"{{"success": false, "error": "Invalid payload: {e}"}}"#);
                    return ExitCode::FAILURE;
                }
            };

            let request = IssueRequest { request_type, student };

            match pipeline.issue(&request) {
                Ok(issued) => {
                    let output = serde_json::json!({
                        "success": true,
                        "issued": issued,
                    });
                    println!("{}", serde_json::to_string_pretty(&output).unwrap());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    let output = serde_json::json!({
                        "success": false,
                        "error": e.to_string(),
                    });
                    println!("{}", serde_json::to_string(&output).unwrap());
                    ExitCode::from(2) // Issuance failure (validation)
                }
            }
        }

        Commands::Demo => {
            let request_type = RequestType::Transcript;
            let student = match Student::new("UCC-0042", "Alejandro Parra", "Ing. Software", 4.2) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Demo student rejected: {e}");
                    return ExitCode::FAILURE;
                }
            };

            match pipeline.issue(&IssueRequest { request_type, student }) {
                Ok(issued) => {
                    println!("=== {request_type} ===");
                    println!("{}", issued.document.body());
                    println!("Sello: {}", issued.document.stamp());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Issuance failed: {e}");
                    ExitCode::from(2)
                }
            }
        }
    }
}
