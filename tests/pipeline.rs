use std::fs;
use std::io::Write;

use adresar::{
    cluster::ClusterEngine,
    group::group_rows,
    io::{read_records, write_groups},
    mapper::{load_sources, SubstitutionTable},
    normalize::{NormalizeMode, Normalizer},
    scorer::ScorerKind,
};

fn write_mapper(dir: &std::path::Path, name: &str, body: &str) {
    let mut file = fs::File::create(dir.join(name)).unwrap();
    file.write_all(body.as_bytes()).unwrap();
}

/// Six records in mixed scripts and formats collapse into exactly three
/// clusters at threshold 90 with the weighted scorer.
#[test]
fn test_end_to_end_grouping() {
    let dir = tempfile::tempdir().unwrap();

    let mappers = dir.path().join("mappers");
    fs::create_dir(&mappers).unwrap();
    write_mapper(&mappers, "01_abbreviations.json", r#"{"ul.": "st", "street": "st"}"#);
    write_mapper(&mappers, "02_cities.json", r#"{"sofia": ["sofiya"]}"#);
    write_mapper(
        &mappers,
        "03_countries.json",
        r#"{"bulgaria": ["balgariya"], "china": ["p.r.c", "prc"]}"#,
    );

    let input = dir.path().join("addresses.csv");
    let mut file = fs::File::create(&input).unwrap();
    writeln!(file, "Name,Address").unwrap();
    writeln!(file, "Ivan Draganov,\"ul. Shipka 34, 1000 Sofia, Bulgaria\"").unwrap();
    writeln!(file, "Leon Wu,\"1 Guanghua Road, Beijing, China 100020\"").unwrap();
    writeln!(file, "Ilona Ilieva,\"ул. Шипка 34, София, България\"").unwrap();
    writeln!(file, "Dragan Doichinov,\"Shipka Street 34, Sofia, Bulgaria\"").unwrap();
    writeln!(
        file,
        "Li Deng,\"1 Guanghua Road, Chaoyang District, Beijing, P.R.C 100020\""
    )
    .unwrap();
    writeln!(
        file,
        "Frieda Müller,\"Konrad-Adenauer-Straße 7, 60313 Frankfurt am Main, Germany\""
    )
    .unwrap();

    let records = read_records(&input).unwrap();
    assert_eq!(records.len(), 6);

    let table = SubstitutionTable::build(load_sources(&mappers));
    let normalizer = Normalizer::new(&table, NormalizeMode::Cyrillic);
    let canonical: Vec<String> = records
        .iter()
        .map(|record| normalizer.normalize(&record.address))
        .collect();

    // The Cyrillic and abbreviated spellings converge on the same tokens
    assert_eq!(canonical[2], "st shipka 34,sofia,bulgaria");
    assert_eq!(canonical[3], "shipka st 34,sofia,bulgaria");

    let engine = ClusterEngine::new(ScorerKind::Weighted.create(), 90);
    let assignment = engine.cluster(canonical.iter().map(|c| c.as_str()));
    assert_eq!(assignment.len(), 3);

    let rows = group_rows(records.iter().zip(canonical.iter()).map(|(record, canonical)| {
        let key = assignment.key_for(canonical).unwrap();
        (key, record.name.as_str())
    }));

    let names: Vec<&str> = rows.iter().map(|row| row.names.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Dragan Doichinov, Ilona Ilieva, Ivan Draganov",
            "Frieda Müller",
            "Leon Wu, Li Deng",
        ]
    );

    let output = dir.path().join("grouped.csv");
    write_groups(&output, &rows).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Dragan Doichinov, Ilona Ilieva, Ivan Draganov",
            "Frieda Müller",
            "Leon Wu, Li Deng",
        ]
    );
}

/// With no usable substitution sources, normalization still cleans
/// whitespace, case, and script, and exact duplicates still cluster.
#[test]
fn test_pipeline_with_empty_mapper_dir() {
    let dir = tempfile::tempdir().unwrap();
    let mappers = dir.path().join("mappers");
    fs::create_dir(&mappers).unwrap();

    let table = SubstitutionTable::build(load_sources(&mappers));
    assert!(table.is_empty());

    let normalizer = Normalizer::new(&table, NormalizeMode::Cyrillic);
    let a = normalizer.normalize("ул. Шипка 34,  София");
    let b = normalizer.normalize("ul. Shipka  34, Sofia");
    assert_eq!(a, "ul. shipka 34,sofiya");
    assert_eq!(b, "ul. shipka 34,sofia");

    let engine = ClusterEngine::new(ScorerKind::Weighted.create(), 90);
    let assignment = engine.cluster([a.as_str(), b.as_str()]);
    // sofiya vs sofia is within edit distance noise at this threshold
    assert_eq!(assignment.len(), 1);
}
