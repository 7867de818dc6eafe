use super::{raw_table, sample_raw};
use crate::error::{RefugioError, SchemaError};
use crate::records::cleaning::{
    STAGES, clean, count_missing, decompose_sex_state, normalize_headers, normalize_location,
    normalize_name, parse_source_date, reparse_dates, split_sex_state, title_case,
};
use crate::records::schema::{
    COLOR, DATOS_FALTANTES, DERIVED_COLUMNS, DONDE_SE_ENCONTRO, ESTADO_REPRODUCTIVO_EGRESO,
    ESTADO_REPRODUCTIVO_INGRESO, FECHA_EGRESO, FECHA_INGRESO, NOMBRE, RAZA, SEXO_EGRESO,
    SEXO_INGRESO, TIPO_DE_ANIMAL,
};
use crate::records::table::{Cell, RecordTable};
use chrono::NaiveDate;
use anyhow::Result;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn text(table: &RecordTable, row: usize, column: &str) -> String {
    table
        .cell(row, column)
        .unwrap_or_else(|| panic!("no cell at row {row}, column {column}"))
        .to_string()
}

#[test]
fn test_clean_sample_export() -> Result<()> {
    let cleaned = clean(sample_raw())?;

    assert_eq!(cleaned.row_count(), 3);
    assert_eq!(cleaned.column_count(), 11 + DERIVED_COLUMNS.len());
    assert_eq!(&cleaned.columns()[11..], &DERIVED_COLUMNS);

    assert_eq!(text(&cleaned, 0, FECHA_INGRESO), "15/03/2023");
    assert_eq!(text(&cleaned, 0, FECHA_EGRESO), "01/04/2023");
    assert_eq!(text(&cleaned, 0, DONDE_SE_ENCONTRO), "Parque Central");
    assert_eq!(text(&cleaned, 0, NOMBRE), "Firulais");
    assert_eq!(text(&cleaned, 0, SEXO_INGRESO), "Macho");
    assert_eq!(text(&cleaned, 0, ESTADO_REPRODUCTIVO_INGRESO), "Entero");
    assert_eq!(text(&cleaned, 0, SEXO_EGRESO), "Macho");
    assert_eq!(text(&cleaned, 0, ESTADO_REPRODUCTIVO_EGRESO), "Castrado");
    assert_eq!(text(&cleaned, 0, COLOR), "Negro");
    assert_eq!(text(&cleaned, 0, TIPO_DE_ANIMAL), "Perro");
    assert_eq!(cleaned.cell(0, DATOS_FALTANTES), Some(&Cell::Count(0)));

    assert_eq!(cleaned.cell(1, FECHA_INGRESO), Some(&Cell::Missing));
    assert_eq!(text(&cleaned, 1, DONDE_SE_ENCONTRO), "Plaza Mayor");
    assert_eq!(text(&cleaned, 1, NOMBRE), "Sin Nombre");
    assert_eq!(text(&cleaned, 1, SEXO_INGRESO), "Macho");
    assert_eq!(text(&cleaned, 1, ESTADO_REPRODUCTIVO_INGRESO), "Desconocido");
    assert_eq!(text(&cleaned, 1, SEXO_EGRESO), "Desconocido");
    assert_eq!(text(&cleaned, 1, ESTADO_REPRODUCTIVO_EGRESO), "Desconocido");
    assert_eq!(text(&cleaned, 1, RAZA), "Labrador Retriever");
    assert_eq!(text(&cleaned, 1, TIPO_DE_ANIMAL), "Gato");
    assert_eq!(cleaned.cell(1, DATOS_FALTANTES), Some(&Cell::Count(3)));

    assert_eq!(text(&cleaned, 2, FECHA_INGRESO), "31/12/2022");
    assert_eq!(text(&cleaned, 2, FECHA_EGRESO), "02/01/2023");
    assert_eq!(cleaned.cell(2, DONDE_SE_ENCONTRO), Some(&Cell::Missing));
    assert_eq!(text(&cleaned, 2, SEXO_INGRESO), "Entera Hembra Joven");
    assert_eq!(text(&cleaned, 2, ESTADO_REPRODUCTIVO_INGRESO), "Desconocido");
    assert_eq!(text(&cleaned, 2, COLOR), "Marrón");
    assert_eq!(text(&cleaned, 2, RAZA), "Siamés");
    assert_eq!(cleaned.cell(2, DATOS_FALTANTES), Some(&Cell::Count(1)));

    Ok(())
}

#[test]
fn test_missing_count_matches_recount() -> Result<()> {
    let cleaned = clean(sample_raw())?;
    let idx = cleaned
        .column_index(DATOS_FALTANTES)
        .expect("count column should exist");

    for (n, row) in cleaned.rows().iter().enumerate() {
        let recount = row
            .iter()
            .enumerate()
            .filter(|(i, cell)| *i != idx && cell.is_missing())
            .count();
        assert_eq!(
            row.get(idx),
            Some(&Cell::Count(recount)),
            "row {n} missing count should match a recount"
        );
    }
    Ok(())
}

#[test]
fn test_date_drops_time_and_swaps_day_month() {
    let date = parse_source_date("03/15/2023 02:30:00 PM").expect("valid export timestamp");
    let rendered = Cell::Date(date).to_string();

    assert_eq!(rendered, "15/03/2023");
    assert!(!rendered.contains(':'), "no time component expected");
    assert_eq!(rendered.split('/').count(), 3);
}

#[test]
fn test_malformed_dates_become_missing() {
    assert_eq!(parse_source_date("not a date"), None);
    assert_eq!(parse_source_date("2023-03-15 14:30:00"), None);
    assert_eq!(parse_source_date("03/15/2023 14:30:00 PM"), None);
    assert_eq!(parse_source_date("02/30/2023 10:00:00 AM"), None);
    assert!(parse_source_date(" 03/15/2023 02:30:00 pm ").is_some());

    // the year must have four digits and AM/PM must stand apart
    assert_eq!(parse_source_date("03/15/23 02:30:00 PM"), None);
    assert_eq!(parse_source_date("03/15/+2023 02:30:00 PM"), None);
    assert_eq!(parse_source_date("03/15/02023 02:30:00 PM"), None);
    assert_eq!(parse_source_date("03/15/2023 02:30:00PM"), None);
    assert_eq!(parse_source_date("03/15/2023 02:30 PM"), None);
    assert_eq!(parse_source_date("03/15/2023 02:30:00 PM extra"), None);

    // single-digit month, day and hour are part of the export layout
    assert_eq!(
        parse_source_date("3/5/2023 2:30:00 PM"),
        NaiveDate::from_ymd_opt(2023, 3, 5)
    );
}

#[test]
fn test_two_digit_year_is_missing_after_clean() -> Result<()> {
    let raw = raw_table(
        "03/15/23 02:30:00 PM,04/01/2023 10:00:00AM,x,Toby,Entero Macho,,a,b,perro,Sano,Adopción\n",
    );
    let cleaned = clean(raw)?;

    assert_eq!(cleaned.cell(0, FECHA_INGRESO), Some(&Cell::Missing));
    assert_eq!(cleaned.cell(0, FECHA_EGRESO), Some(&Cell::Missing));
    Ok(())
}

#[test]
fn test_bad_date_does_not_abort_pipeline() -> Result<()> {
    let raw = raw_table("garbage,also garbage,x,Toby,Entero Macho,,a,b,perro,Sano,Adopción\n");
    let cleaned = clean(raw)?;

    assert_eq!(cleaned.cell(0, FECHA_INGRESO), Some(&Cell::Missing));
    assert_eq!(cleaned.cell(0, FECHA_EGRESO), Some(&Cell::Missing));
    assert_eq!(text(&cleaned, 0, TIPO_DE_ANIMAL), "Perro");
    assert_eq!(cleaned.cell(0, DATOS_FALTANTES), Some(&Cell::Count(3)));
    Ok(())
}

#[test]
fn test_reparse_dates_is_repeatable() -> Result<()> {
    let once = reparse_dates(normalize_headers(sample_raw())?)?;
    let twice = reparse_dates(once.clone())?;
    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn test_headers_are_trimmed() -> Result<()> {
    let table = normalize_headers(sample_raw())?;
    assert_eq!(table.columns()[0], FECHA_INGRESO);
    assert_eq!(table.columns()[3], NOMBRE);
    Ok(())
}

#[test]
fn test_missing_required_columns() {
    let raw = crate::records::read_table("Nombre,Color\nToby,negro\n".as_bytes())
        .expect("csv should parse");

    match clean(raw) {
        Err(RefugioError::Schema(SchemaError::MissingColumns(cols))) => {
            assert_eq!(cols.len(), 9);
            assert!(cols.contains(&FECHA_INGRESO.to_owned()));
            assert!(!cols.contains(&NOMBRE.to_owned()));
        }
        other => panic!("expected missing columns, got {other:?}"),
    }
}

#[test]
fn test_duplicate_after_trim() {
    let raw = crate::records::read_table("Nombre, Nombre\nA,B\n".as_bytes())
        .expect("csv should parse");
    let err = normalize_headers(raw).unwrap_err();
    assert!(
        matches!(err, RefugioError::Schema(SchemaError::DuplicateColumn(ref c)) if c == "Nombre"),
        "got {err:?}"
    );
}

#[test]
fn test_blank_and_repeated_optional_headers_are_renamed() -> Result<()> {
    let raw = crate::records::read_table(
        format!(
            "{},Observaciones, Observaciones ,,\n\
03/15/2023 02:30:00 PM,,plaza,Toby,Entero Macho,,negro,mestizo,perro,Sano,Adopción,a,b,,\n",
            super::HEADER
        )
        .as_bytes(),
    )
    .unwrap();

    let cleaned = clean(raw)?;
    assert_eq!(
        &cleaned.columns()[11..15],
        &["Observaciones", "Observaciones.1", "Unnamed: 13", "Unnamed: 14"]
    );
    assert_eq!(text(&cleaned, 0, "Observaciones.1"), "b");
    assert_eq!(cleaned.row_count(), 1);
    Ok(())
}

#[test]
fn test_trailing_commas_in_header_still_load() -> Result<()> {
    let raw = crate::records::read_table(
        format!(
            "{},,\n03/15/2023 02:30:00 PM,,plaza,Toby,Entero Macho,,negro,mestizo,perro,Sano,Adopción,,\n",
            super::HEADER
        )
        .as_bytes(),
    )?;

    let table = normalize_headers(raw)?;
    assert_eq!(&table.columns()[11..], &["Unnamed: 11", "Unnamed: 12"]);
    Ok(())
}

#[test]
fn test_name_normalization() -> Result<()> {
    let raw = raw_table(
        ",,,\"  *Firulais* \",,,,,,,\n,,,\"\",,,,,,,\n,,,\"***\",,,,,,,\n,,,\"Don *Pepe*\",,,,,,,\n",
    );
    let table = normalize_name(normalize_headers(raw)?)?;

    assert_eq!(text(&table, 0, NOMBRE), "Firulais");
    assert_eq!(text(&table, 1, NOMBRE), "Sin Nombre");
    assert_eq!(text(&table, 2, NOMBRE), "Sin Nombre");
    assert_eq!(text(&table, 3, NOMBRE), "Don Pepe");
    Ok(())
}

#[test]
fn test_location_stage_alone() -> Result<()> {
    let table = normalize_location(normalize_headers(sample_raw())?)?;
    assert_eq!(text(&table, 0, DONDE_SE_ENCONTRO), "Parque Central");
    // other columns untouched
    assert_eq!(text(&table, 0, TIPO_DE_ANIMAL), "perro");
    assert_eq!(text(&table, 0, NOMBRE), "  *Firulais* ");
    Ok(())
}

#[test]
fn test_split_sex_state_examples() {
    assert_eq!(
        split_sex_state(&Cell::from("Entero Macho")),
        (Cell::from("Macho"), Cell::from("Entero"))
    );
    assert_eq!(
        split_sex_state(&Cell::from("Macho")),
        (Cell::from("Macho"), Cell::from("Desconocido"))
    );
    assert_eq!(
        split_sex_state(&Cell::Missing),
        (Cell::from("Desconocido"), Cell::from("Desconocido"))
    );
    // the fallback keeps the original, unsplit and untrimmed
    assert_eq!(
        split_sex_state(&Cell::from(" Castrada  Hembra Adulta ")),
        (Cell::from(" Castrada  Hembra Adulta "), Cell::from("Desconocido"))
    );
    assert_eq!(
        split_sex_state(&Cell::from("  Castrada\tHembra ")),
        (Cell::from("Hembra"), Cell::from("Castrada"))
    );
}

#[test]
fn test_decompose_appends_derived_columns() -> Result<()> {
    let table = decompose_sex_state(normalize_headers(sample_raw())?)?;
    assert_eq!(&table.columns()[11..], &DERIVED_COLUMNS[..4]);
    Ok(())
}

#[test]
fn test_count_missing_replaces_existing_column() -> Result<()> {
    let table = count_missing(count_missing(normalize_headers(sample_raw())?)?)?;
    let occurrences = table
        .columns()
        .iter()
        .filter(|c| *c == DATOS_FALTANTES)
        .count();
    assert_eq!(occurrences, 1);
    Ok(())
}

#[test]
fn test_title_case() {
    assert_eq!(title_case("plaza mayor"), "Plaza Mayor");
    assert_eq!(title_case("PLAZA MAYOR"), "Plaza Mayor");
    assert_eq!(title_case("mixed-breed"), "Mixed-Breed");
    assert_eq!(title_case("o'higgins"), "O'Higgins");
    assert_eq!(title_case("ñandú"), "Ñandú");
    assert_eq!(title_case(""), "");
}

#[test]
fn test_stage_order() {
    let names: Vec<&str> = STAGES.iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        vec![
            "normalize_headers",
            "reparse_dates",
            "normalize_location",
            "normalize_name",
            "decompose_sex_state",
            "titlecase_categories",
            "count_missing",
        ]
    );
}

#[test]
fn test_clean_is_deterministic() -> Result<()> {
    assert_eq!(clean(sample_raw())?, clean(sample_raw())?);
    Ok(())
}

proptest! {
    #[test]
    fn prop_two_token_split_is_stable(state in "[A-Za-zñ]{1,12}", sex in "[A-Za-zñ]{1,12}") {
        let (first_sex, first_state) = split_sex_state(&Cell::text(format!("{state} {sex}")));
        prop_assert_eq!(&first_sex, &Cell::text(sex.as_str()));
        prop_assert_eq!(&first_state, &Cell::text(state.as_str()));

        // re-splitting the derived pair reproduces the same mapping
        let again = split_sex_state(&Cell::text(format!("{first_state} {first_sex}")));
        prop_assert_eq!(again, (first_sex.clone(), first_state));

        // a lone derived token falls back to (token, unknown)
        let single = split_sex_state(&first_sex);
        prop_assert_eq!(single, (first_sex, Cell::text("Desconocido")));
    }
}
