use crate::models::Country;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const HEADER: [&str; 8] = [
    "cca3",
    "common_name",
    "official_name",
    "region",
    "subregion",
    "capital",
    "population",
    "area",
];

/// Prefix cells that a spreadsheet would evaluate as a formula.
fn safe_cell(s: &str) -> String {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{}", s),
        _ => s.to_string(),
    }
}

/// Save countries as CSV with header, one row per country.
pub fn save_csv<P: AsRef<Path>>(countries: &[&Country], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.write_record(HEADER)?;
    for c in countries {
        let capital = c.capital.as_deref().unwrap_or_default().join("; ");
        wtr.write_record([
            safe_cell(&c.cca3),
            safe_cell(&c.name.common),
            safe_cell(&c.name.official),
            safe_cell(&c.region),
            safe_cell(c.subregion.as_deref().unwrap_or("")),
            safe_cell(&capital),
            c.population.to_string(),
            c.area.map(|a| a.to_string()).unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save full country records as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(countries: &[&Country], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(countries)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Pick the writer from an explicit format or the file extension (CSV default).
pub fn save<P: AsRef<Path>>(countries: &[&Country], path: P, format: Option<&str>) -> Result<()> {
    let path = path.as_ref();
    let fmt = format
        .or_else(|| path.extension().and_then(|e| e.to_str()))
        .unwrap_or("csv")
        .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => save_csv(countries, path),
        "json" => save_json(countries, path),
        other => anyhow::bail!("unsupported format: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountryName;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let peru = Country {
            name: CountryName {
                common: "Peru".into(),
                official: "Republic of Peru".into(),
                ..Default::default()
            },
            cca3: "PER".into(),
            region: "Americas".into(),
            population: 32_971_846,
            ..Default::default()
        };
        save(&[&peru], &csvp, None).unwrap();
        save(&[&peru], &jsonp, None).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());
        assert!(save(&[&peru], dir.path().join("x.xml"), None).is_err());
    }

    #[test]
    fn formula_starters_are_quoted() {
        assert_eq!(safe_cell("=1+1"), "'=1+1");
        assert_eq!(safe_cell("Peru"), "Peru");
    }
}
