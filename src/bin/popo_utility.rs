// Copyright 2024 Popo Utility Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Command-line front end for the popo-utility nodes
//!
//! Evaluates math expressions, lists the whitelisted functions and prints
//! the node descriptors a workflow host would load.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use popo_utility::ast::NameCollector;
use popo_utility::evaluator::Namespace;
use popo_utility::nodes::{ImageShape, PopoImageAspectRatioNode, PopoImageDimensionsNode};
use popo_utility::registry::CONSTANTS;
use popo_utility::{
    EvaluatorConfig, MathExpressionEngine, parse, standard_node_registry, standard_registry,
};
use serde_json::json;
use std::process;

#[derive(Parser)]
#[command(name = "popo-utility")]
#[command(about = "Image shape nodes and a sandboxed math expression evaluator")]
#[command(version)]
#[command(author = "Popo Utility Developers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a math expression over a, b and c
    Eval {
        /// Expression to evaluate
        expression: String,
        /// Value bound to `a`
        #[arg(short, default_value_t = 0.0, allow_hyphen_values = true)]
        a: f64,
        /// Value bound to `b`
        #[arg(short, default_value_t = 0.0, allow_hyphen_values = true)]
        b: f64,
        /// Value bound to `c`
        #[arg(short, default_value_t = 0.0, allow_hyphen_values = true)]
        c: f64,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Report failures instead of returning (0, 0.0)
        #[arg(long)]
        strict: bool,
    },
    /// Parse an expression and print its syntax tree
    Parse {
        /// Expression to parse
        expression: String,
    },
    /// List whitelisted functions and constants
    Functions,
    /// Print the node descriptors as JSON
    Nodes {
        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Name the aspect ratio of a width and height
    Aspect {
        /// Width in pixels
        width: usize,
        /// Height in pixels
        height: usize,
    },
}

fn main() {
    // Setup human-panic for better error messages
    human_panic::setup_panic!();
    env_logger::init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Eval {
            expression,
            a,
            b,
            c,
            json,
            strict,
        } => handle_eval(&expression, (a, b, c), json, strict),
        Commands::Parse { expression } => handle_parse(&expression),
        Commands::Functions => {
            handle_functions();
            Ok(())
        }
        Commands::Nodes { pretty } => handle_nodes(pretty),
        Commands::Aspect { width, height } => {
            handle_aspect(width, height);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("✗ {e:#}");
        process::exit(1);
    }
}

fn handle_eval(expression: &str, (a, b, c): (f64, f64, f64), json: bool, strict: bool) -> Result<()> {
    let engine = MathExpressionEngine::with_config(EvaluatorConfig::no_cache());

    let result = if strict {
        engine
            .try_evaluate(a, b, c, expression)
            .map_err(|e| anyhow::anyhow!("{e} ({})", e.category()))?
    } else {
        engine.evaluate(a, b, c, expression)
    };

    if json {
        println!(
            "{}",
            serde_json::to_string(&result).context("serialising result")?
        );
    } else {
        println!("{result}");
    }
    Ok(())
}

fn handle_parse(expression: &str) -> Result<()> {
    let ast = parse(expression).context("parse error")?;
    println!("✓ Expression parsed successfully");
    println!("Expression: {expression}");
    println!("AST: {ast}");

    let namespace = Namespace::new(0.0, 0.0, 0.0);
    let (resolved, unresolved): (Vec<String>, Vec<String>) = NameCollector::collect(&ast)
        .into_iter()
        .partition(|name| namespace.contains(name));
    println!("Names: {}", resolved.join(", "));
    if !unresolved.is_empty() {
        println!("Unresolved: {}", unresolved.join(", "));
    }
    Ok(())
}

fn handle_functions() {
    for function in standard_registry().iter() {
        println!(
            "{:<40} {}",
            function.signature().to_string(),
            function.documentation()
        );
    }
    println!();
    for constant in CONSTANTS.iter() {
        println!("{:<40} {}", constant.name, constant.description);
    }
}

fn handle_nodes(pretty: bool) -> Result<()> {
    let registry = standard_node_registry();
    let document = json!({
        "nodes": registry.descriptors(),
        "display_names": registry
            .display_name_mappings()
            .into_iter()
            .map(|(class_name, display_name)| (class_name.to_string(), json!(display_name)))
            .collect::<serde_json::Map<_, _>>(),
    });
    let output = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    println!("{output}");
    Ok(())
}

fn handle_aspect(width: usize, height: usize) {
    let shape = ImageShape::new([height, width, 3]);
    let (ratio, name) = PopoImageAspectRatioNode.calculate_aspect_ratio(&shape);
    let (_, _, long, short) = PopoImageDimensionsNode.get_dimensions(&shape);
    println!("{width}x{height}: {ratio} {name} (long {long}, short {short})");
}
