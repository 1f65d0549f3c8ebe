use std::env;

use anyhow::{Context, Result};
use log::info;

use tradematrix::config::Config;
use tradematrix::format::split_thousands;
use tradematrix::input::trade::TradeDataset;
use tradematrix::matrix::{rank_countries, TradeMatrixCache};
use tradematrix::output::{ranked_records, write_json};
use tradematrix::source::baci::BaciSource;

fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    let mut config = Config::from_env()?;
    if let Some(top_n) = args.get(1) {
        config.top_n = top_n
            .parse()
            .with_context(|| format!("top_n must be a number, got {top_n}"))?;
    }

    let source = BaciSource::hs22_2023(&config.input_dir);
    let dataset = TradeDataset::from_baci(&source, config.product)?;
    println!("{}", dataset.diagnostics());

    let ranking = rank_countries(dataset.records());
    let ranked = ranked_records(&dataset, &ranking)
        .context("ranking does not cover every country in the dataset")?;
    write_json(&config.output_dir.join("baci_dataset.json"), &ranked)?;

    let cache = TradeMatrixCache::new(dataset.records(), &ranking);
    info!("Built {0}x{0} matrix", cache.countries());
    let matrix = cache.slice(config.top_n)?;
    write_json(&config.output_dir.join("trade_matrix.json"), &matrix)?;

    for rank in ranking.ranks().iter().take(config.top_n) {
        println!(
            "{:>3}  {:<30} {:>16} t",
            rank.rank,
            rank.country,
            split_thousands(rank.total, 2)
        );
    }
    Ok(())
}
