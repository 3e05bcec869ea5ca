//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docflow")]
#[command(about = "Docflow - Document Classification and Workflow Engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from a specific file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Override the configured listen port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Classify a document file against the catalog
    Classify {
        /// Path to the document text file
        file: PathBuf,
    },

    /// List the configured document types
    Types,

    /// Agent management commands
    #[command(subcommand)]
    Agent(AgentCommands),

    /// Assignment management commands
    #[command(subcommand)]
    Assignment(AssignmentCommands),
}

#[derive(Subcommand)]
pub enum AgentCommands {
    /// Register a new agent
    Add {
        /// Agent id
        id: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Step actions the agent can perform (comma-separated)
        #[arg(short = 'c', long = "capability", value_delimiter = ',')]
        capabilities: Vec<String>,
    },

    /// List registered agents
    List,

    /// Remove an agent (its assignments are removed too)
    Remove {
        /// Agent id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum AssignmentCommands {
    /// List assignments
    List,

    /// Bind an agent and workflow to a document type
    Set {
        /// Document type id
        document_type_id: String,

        /// Agent id to bind
        #[arg(short, long)]
        agent: String,

        /// Path to a JSON workflow definition
        #[arg(short, long)]
        workflow: PathBuf,
    },

    /// Remove the assignment for a document type
    Remove {
        /// Document type id
        document_type_id: String,
    },

    /// Run a sample document through the assigned workflow
    Test {
        /// Document type id
        document_type_id: String,

        /// Sample document id
        #[arg(short, long)]
        document: String,
    },
}
