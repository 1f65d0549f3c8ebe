mod common;

use tradematrix::error::Error;
use tradematrix::input::country::CountryLookup;
use tradematrix::input::trade::TradeDataset;
use tradematrix::matrix::{
    build_matrix, collapse_rest_of_world, rank_countries, TradeMatrixCache, REST_OF_WORLD,
};
use tradematrix::output::ranked_records;

fn load() -> TradeDataset {
    let mut archive = common::archive(common::TRADE, common::COUNTRIES);
    let lookup = CountryLookup::from_rows(&archive.country_codes().unwrap());
    let rows = archive.trade_rows(440791).unwrap();
    TradeDataset::from_rows(&rows, &lookup).unwrap()
}

#[test]
fn test_that_archive_loads_into_dataset() {
    let dataset = load();

    assert_eq!(dataset.len(), 6);
    let diagnostics = dataset.diagnostics();
    assert_eq!(diagnostics.exporters, 5);
    assert_eq!(diagnostics.importers, 4);
    assert_eq!(diagnostics.pairs, 6);

    let names: Vec<&str> = dataset
        .records()
        .iter()
        .map(|r| r.exporter.as_str())
        .collect();
    assert!(names.contains(&"UK"));
    assert!(names.contains(&"Côte d'Ivoire"));
}

#[test]
fn test_that_pipeline_ranks_and_pivots() {
    let dataset = load();
    let ranking = rank_countries(dataset.records());

    assert_eq!(
        ranking.order(),
        vec!["USA", "China", "France", "UK", "Côte d'Ivoire"]
    );

    let matrix = build_matrix(dataset.records(), &ranking.order(), 3).unwrap();
    assert_eq!(matrix.size(), 3);
    assert_eq!(matrix.rows, vec!["USA", "China", "France"]);
    assert_eq!(matrix.columns, vec!["USA", "China", "France"]);
    assert_eq!(
        matrix.values,
        vec![
            vec![0.0, 0.0, 10.0],
            vec![170.8, 0.0, 0.0],
            vec![30.0, 0.0, 0.0]
        ]
    );

    let cache = TradeMatrixCache::new(dataset.records(), &ranking);
    assert_eq!(cache.slice(3).unwrap(), matrix);
    assert_eq!(
        cache.slice(6),
        Err(Error::InvalidTopN {
            top_n: 6,
            countries: 5
        })
    );
}

#[test]
fn test_that_ranked_records_keep_source_codes() {
    let dataset = load();
    let ranking = rank_countries(dataset.records());
    let ranked = ranked_records(&dataset, &ranking).unwrap();

    let first = &ranked[0];
    assert_eq!(first.exporter_name, "USA");
    assert_eq!(first.importer_name, "China");
    assert_eq!((first.exporter_rank, first.importer_rank), (1, 2));
    assert_eq!(first.exporter, Some(842));
    assert_eq!(first.year, Some(2023));

    let json = serde_json::to_value(first).unwrap();
    assert_eq!(json["exporter_rank"], 1);
    assert_eq!(json["product"], 440791);
}

#[test]
fn test_that_unknown_country_code_is_reported() {
    let trade = format!("{}2023,999,842,440791,1.0,1.0\n", common::TRADE);
    let mut archive = common::archive(&trade, common::COUNTRIES);
    let lookup = CountryLookup::from_rows(&archive.country_codes().unwrap());
    let rows = archive.trade_rows(440791).unwrap();

    let result = TradeDataset::from_rows(&rows, &lookup);
    assert_eq!(result.unwrap_err(), Error::UnknownCountry { code: 999 });
}

#[test]
fn test_that_rest_of_world_feeds_the_matrix() {
    let dataset = load();
    let collapsed = TradeDataset::from_records(collapse_rest_of_world(dataset.records(), 2));
    let ranking = rank_countries(collapsed.records());

    // Top exporters USA and France, top importers China and France
    assert_eq!(ranking.order(), vec!["USA", "China", "France", REST_OF_WORLD]);
    let matrix = build_matrix(collapsed.records(), &ranking.order(), 4).unwrap();
    assert_eq!(matrix.get(REST_OF_WORLD, "USA"), Some(0.0));
    assert_eq!(matrix.get(REST_OF_WORLD, "France"), Some(10.0));
    assert_eq!(matrix.get("France", REST_OF_WORLD), Some(1.0));
    assert_eq!(matrix.get(REST_OF_WORLD, REST_OF_WORLD), Some(8.0));
}
