use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use jyotish_analysis::{
    AmshaVargaProvider, Analysis, AnalysisConfig, AnalysisError, ClassicalKarakas, RankingSystem,
    canonical_varga,
};
use jyotish_base::{Amsha, AmshaVariation, NatalChart, Rashi};
use log::{LevelFilter, debug};
use serde_json::{Value, json};

#[derive(Parser)]
#[command(name = "jyotish", about = "Jyotish chart analysis CLI", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chara karakas of a chart
    Karaka {
        /// Path to the chart JSON
        #[arg(long)]
        chart: PathBuf,
        /// Ranking system: parashara or jaimini
        #[arg(long, env = "JYOTISH_SYSTEM", default_value = "parashara")]
        system: String,
        /// Key the output by karaka instead of graha
        #[arg(long)]
        reverse: bool,
        /// List grahas in rank order with karaka names and significations
        #[arg(long, conflicts_with = "reverse")]
        ranked: bool,
    },
    /// Navamsha rashi of the Atmakaraka
    Karakamsha {
        /// Path to the chart JSON
        #[arg(long)]
        chart: PathBuf,
        /// Ranking system used to find the Atmakaraka
        #[arg(long, env = "JYOTISH_SYSTEM", default_value = "parashara")]
        system: String,
    },
    /// Navamsha rashi of the lagna
    Lagnamsha {
        /// Path to the chart JSON
        #[arg(long)]
        chart: PathBuf,
    },
    /// Divisional chart placements
    Varga {
        /// Path to the chart JSON
        #[arg(long)]
        chart: PathBuf,
        /// Varga identifier (d1..d60)
        #[arg(long, env = "JYOTISH_VARGA", default_value = "d9")]
        varga: String,
        /// Use the Cancer/Leo-only hora for D2
        #[arg(long)]
        hora_cancer_leo: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Failed to encode output: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(command: Commands) -> Result<Value, String> {
    match command {
        Commands::Karaka {
            chart,
            system,
            reverse,
            ranked,
        } => {
            let system = parse_system(&system)?;
            let analysis = Analysis::new(&load_chart(&chart)?).map_err(fmt_err)?;
            if ranked {
                ranked_output(&analysis, system)
            } else {
                karaka_output(&analysis, system, reverse)
            }
        }
        Commands::Karakamsha { chart, system } => {
            let config = AnalysisConfig {
                default_system: parse_system(&system)?,
                ..AnalysisConfig::default()
            };
            let analysis = Analysis::new(&load_chart(&chart)?)
                .and_then(|a| a.with_config(config))
                .map_err(fmt_err)?;
            let rashi = analysis.karakamsha().map_err(fmt_err)?;
            Ok(rashi_output("karakamsha", rashi))
        }
        Commands::Lagnamsha { chart } => {
            let analysis = Analysis::new(&load_chart(&chart)?).map_err(fmt_err)?;
            let rashi = analysis.lagnamsha().map_err(fmt_err)?;
            Ok(rashi_output("lagnamsha", rashi))
        }
        Commands::Varga {
            chart,
            varga,
            hora_cancer_leo,
        } => {
            let variation = if hora_cancer_leo {
                AmshaVariation::HoraCancerLeoOnly
            } else {
                AmshaVariation::TraditionalParashari
            };
            let analysis = Analysis::with_providers(
                &load_chart(&chart)?,
                AmshaVargaProvider::new(variation),
                ClassicalKarakas,
            )
            .map_err(fmt_err)?;
            varga_output(&analysis, &varga)
        }
    }
}

fn load_chart(path: &Path) -> Result<NatalChart, String> {
    debug!("reading chart from {}", path.display());
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    NatalChart::from_json_str(&text).map_err(|e| format!("Invalid chart {}: {e}", path.display()))
}

fn parse_system(s: &str) -> Result<RankingSystem, String> {
    s.parse::<RankingSystem>()
        .map_err(|e| format!("{e} (valid: parashara, jaimini)"))
}

fn fmt_err(e: AnalysisError) -> String {
    format!("Analysis failed: {e}")
}

fn fmt_json_err(e: serde_json::Error) -> String {
    format!("Failed to encode output: {e}")
}

fn karaka_output(
    analysis: &Analysis,
    system: RankingSystem,
    reverse: bool,
) -> Result<Value, String> {
    if reverse {
        let reversed = analysis.chara_karaka_reversed(system).map_err(fmt_err)?;
        serde_json::to_value(reversed).map_err(fmt_json_err)
    } else {
        let forward = analysis.chara_karaka(system).map_err(fmt_err)?;
        serde_json::to_value(forward).map_err(fmt_json_err)
    }
}

fn ranked_output(analysis: &Analysis, system: RankingSystem) -> Result<Value, String> {
    let ranking = analysis.chara_karaka_ranking(system).map_err(fmt_err)?;
    Ok(ranking
        .into_iter()
        .map(|(graha, karaka)| {
            json!({
                "graha": graha,
                "karaka": karaka,
                "name": karaka.name(),
                "signification": karaka.signification(),
            })
        })
        .collect())
}

fn varga_output(analysis: &Analysis, varga: &str) -> Result<Value, String> {
    let data = analysis.varga_data(varga).map_err(fmt_err)?;
    let id = canonical_varga(varga);
    let name = id.parse::<Amsha>().ok().map(Amsha::sanskrit_name);
    Ok(json!({
        "varga": id,
        "name": name,
        "graha": data.graha,
        "extra": data.extra,
    }))
}

fn rashi_output(label: &str, rashi: u8) -> Value {
    let named = Rashi::from_number(rashi);
    json!({
        label: rashi,
        "name": named.map(Rashi::name),
        "western_name": named.map(Rashi::western_name),
    })
}
