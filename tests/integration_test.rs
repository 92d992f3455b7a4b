use csvsift::executor::{
    column_stats, filter_advanced, filter_all, filter_equals, filter_operator, sort,
    unique_values, SortOrder,
};
use csvsift::expression::{
    collect_conditions, collect_equality_conditions, ComparisonOperator, Condition, QueryError,
};
use csvsift::session::Session;
use csvsift::storage::{read_table, write_table};
use csvsift::table::{load_table, resolve_column, Table};
use std::collections::BTreeSet;
use tempfile::tempdir;

fn people() -> Table {
    load_table("name,age", ["Al,30", "Bo,25", "Cy,30"])
}

fn column<'a>(table: &'a Table, name: &str) -> Vec<&'a str> {
    table.iter().map(|row| row.get(name).unwrap_or("")).collect()
}

#[test]
fn test_end_to_end_example() {
    let table = people();

    let sorted = sort(&table, "age", SortOrder::from_input("asc")).unwrap();
    assert_eq!(column(&sorted, "name"), vec!["Bo", "Al", "Cy"]);

    let filtered = filter_equals(&table, "AGE", "30").unwrap();
    assert_eq!(column(&filtered, "name"), vec!["Al", "Cy"]);

    let names = unique_values(&table, "name").unwrap();
    let expected: BTreeSet<String> = ["Al", "Bo", "Cy"].iter().map(|s| s.to_string()).collect();
    assert_eq!(names, expected);

    // The input table is untouched by every operation.
    assert_eq!(column(&table, "name"), vec!["Al", "Bo", "Cy"]);
}

#[test]
fn test_resolve_returns_canonical_name_for_any_case() {
    let table = load_table("First Name,ZIP,city", ["Al,0150,Oslo"]);
    for canonical in table.header() {
        let variants = [
            canonical.to_lowercase(),
            canonical.to_uppercase(),
            canonical.clone(),
        ];
        for variant in &variants {
            assert_eq!(resolve_column(&table, variant), Some(canonical.as_str()));
        }
    }
}

#[test]
fn test_multi_filter_equals_sequential_single_filters() {
    let table = load_table(
        "name,city,team",
        ["Al,Oslo,red", "Bo,Oslo,blue", "Cy,Bergen,red", "Di,oslo,RED"],
    );
    let (conditions, rejected) =
        collect_equality_conditions(&table, [("CITY", "oslo"), ("Team", "red")]);
    assert!(rejected.is_empty());

    let combined = filter_all(&table, &conditions).unwrap();
    let sequential = filter_equals(&table, "CITY", "oslo")
        .and_then(|t| filter_equals(&t, "Team", "red"))
        .unwrap();
    assert_eq!(combined, sequential);
    assert_eq!(column(&combined, "name"), vec!["Al", "Di"]);
}

#[test]
fn test_operator_equals_on_numeric_column() {
    let table = load_table("id,n", ["a,5", "b,5.0", "c,50", "d,5.5", "e,05"]);
    let result = filter_operator(&table, "n", "==", "5").unwrap();
    assert_eq!(column(&result, "id"), vec!["a", "b", "e"]);
}

#[test]
fn test_advanced_filter_union_and_intersection() {
    let table = load_table(
        "id,score,city",
        ["only-score,90,Bergen", "only-city,10,Oslo", "both,95,oslo", "neither,20,Rome"],
    );
    let (conditions, rejected) =
        collect_conditions(&table, [("score", ">=", "90"), ("CITY", "==", "OSLO")]);
    assert!(rejected.is_empty());

    let union = filter_advanced(&table, &conditions, "OR").unwrap();
    assert_eq!(column(&union, "id"), vec!["only-score", "only-city", "both"]);

    let intersection = filter_advanced(&table, &conditions, "and").unwrap();
    assert_eq!(column(&intersection, "id"), vec!["both"]);
}

#[test]
fn test_advanced_filter_each_condition_keeps_its_own_binding() {
    let table = load_table(
        "id,a,b,c",
        ["r1,1,x,10", "r2,2,y,20", "r3,3,z,30", "r4,1,z,30"],
    );
    let conditions = vec![
        Condition::new("a", ComparisonOperator::Eq, "1"),
        Condition::new("b", ComparisonOperator::Eq, "z"),
        Condition::new("c", ComparisonOperator::Gt, "25"),
    ];
    let all = filter_advanced(&table, &conditions, "and").unwrap();
    assert_eq!(column(&all, "id"), vec!["r4"]);

    let any = filter_advanced(&table, &conditions, "or").unwrap();
    assert_eq!(column(&any, "id"), vec!["r1", "r3", "r4"]);
}

#[test]
fn test_sort_stability_and_whole_column_text_fallback() {
    let table = load_table(
        "id,v",
        ["a,2", "b,1", "c,2", "d,10", "e,1"],
    );
    let numeric = sort(&table, "v", SortOrder::Asc).unwrap();
    assert_eq!(column(&numeric, "id"), vec!["b", "e", "a", "c", "d"]);

    let mixed = load_table("id,v", ["a,2", "b,10", "c,n/a", "d,1"]);
    let text = sort(&mixed, "v", SortOrder::Asc).unwrap();
    assert_eq!(column(&text, "id"), vec!["d", "b", "a", "c"]);
}

#[test]
fn test_stats_numeric_and_non_numeric() {
    let table = load_table("n,m", ["1,1", "2,x", "3,3"]);

    let stats = column_stats(&table, "n").unwrap();
    assert_eq!((stats.total, stats.unique), (3, 3));
    let summary = stats.numeric.unwrap();
    assert_eq!((summary.min, summary.max), (1.0, 3.0));
    assert_eq!(format!("{:.2}", summary.average), "2.00");

    let stats = column_stats(&table, "M").unwrap();
    assert_eq!(stats.total, 3);
    assert!(stats.numeric.is_none());
}

#[test]
fn test_session_threads_results_and_resets() {
    let mut session = Session::new(people());

    let result = filter_equals(session.working(), "age", "30");
    session.apply(result).unwrap();
    let result = sort(session.working(), "name", SortOrder::Desc);
    session.apply(result).unwrap();
    assert_eq!(column(session.working(), "name"), vec!["Cy", "Al"]);

    let result = filter_equals(session.working(), "height", "1");
    assert_eq!(
        session.apply(result),
        Err(QueryError::ColumnNotFound("height".to_string()))
    );
    assert_eq!(session.working().len(), 2);

    session.reset();
    assert_eq!(session.working().len(), 3);
}

#[test]
fn test_file_round_trip_of_filtered_table() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("people.csv");
    std::fs::write(&input, "name,age,city\nAl,30,Oslo\nBo,25\nCy,30,Bergen\n")?;

    let table = read_table(&input)?;
    assert_eq!(table.len(), 3);
    assert_eq!(table.rows()[1].get("city"), None);

    let filtered = filter_equals(&table, "age", "30").unwrap();
    let output = dir.path().join("out.csv");
    write_table(&output, &filtered)?;

    let reloaded = read_table(&output)?;
    assert_eq!(reloaded, filtered);
    Ok(())
}
