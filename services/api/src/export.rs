use chrono::{DateTime, Utc};
use morphbox::domain::{MorphologicalBox, Parameter};
use morphbox::error::AppError;
use morphbox::explorer::RankedCombination;
use std::io;

const SCORE_COLUMNS: [&str; 6] = [
    "compatibility",
    "technical",
    "innovation",
    "principles",
    "overall",
    "constraints_satisfied",
];

/// Render ranked combinations as CSV, one column per parameter followed by the
/// score axes.
pub(crate) fn render_csv(
    explorer_box: &MorphologicalBox,
    ranked: &[RankedCombination],
) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_rows(&mut writer, explorer_box, ranked).map_err(io::Error::from)?;

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    String::from_utf8(bytes)
        .map_err(|err| AppError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

fn write_rows<W: io::Write>(
    writer: &mut csv::Writer<W>,
    explorer_box: &MorphologicalBox,
    ranked: &[RankedCombination],
) -> Result<(), csv::Error> {
    let columns: Vec<&Parameter> = explorer_box
        .parameters
        .iter()
        .filter(|parameter| !parameter.attributes.is_empty())
        .collect();

    let mut header = vec!["rank"];
    header.extend(columns.iter().map(|parameter| parameter.name.as_str()));
    header.extend(SCORE_COLUMNS);
    writer.write_record(&header)?;

    for entry in ranked {
        let mut record = vec![entry.rank.to_string()];
        record.extend(columns.iter().map(|parameter| {
            entry
                .combination
                .get(&parameter.id)
                .map(|selection| selection.label(parameter).to_string())
                .unwrap_or_default()
        }));

        let score = &entry.score;
        record.push(format!("{:.1}", score.compatibility_score));
        record.push(format!("{:.1}", score.technical_score));
        record.push(
            score
                .innovation_score
                .map(|value| format!("{value:.1}"))
                .unwrap_or_default(),
        );
        record.push(format!("{:.1}", score.principle_score));
        record.push(format!("{:.1}", entry.overall));
        record.push(score.constraints_satisfied.to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

pub(crate) fn export_filename(generated_at: &DateTime<Utc>) -> String {
    format!("combinations-{}.csv", generated_at.format("%Y%m%dT%H%M%SZ"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use morphbox::domain::{Attribute, Combination, Selection, Weight};
    use morphbox::explorer::CombinationScore;

    fn sample_box() -> MorphologicalBox {
        let weight = Weight::new(5).expect("valid weight");
        MorphologicalBox {
            name: "Lamp".to_string(),
            parameters: vec![
                Parameter::new("shade", "Shade", weight)
                    .with_attribute(Attribute::new("paper", "Rice paper"))
                    .with_attribute(Attribute::new("glass", "Glass")),
                Parameter::new("base", "Base", Weight::new(2).expect("valid weight"))
                    .with_attribute(Attribute::new("oak", "Oak")),
                Parameter::new("empty", "Unused", weight),
            ],
            ..MorphologicalBox::default()
        }
    }

    fn entry(rank: usize, combination: Combination, innovation: Option<f64>) -> RankedCombination {
        let score = CombinationScore {
            compatibility_score: 50.0,
            technical_score: 62.5,
            innovation_score: innovation,
            principle_score: 0.0,
            constraints_satisfied: true,
        };
        RankedCombination {
            rank,
            combination,
            overall: score.overall(),
            score,
        }
    }

    #[test]
    fn renders_names_placeholders_and_blank_innovation() {
        let mut placeholder = Combination::new().with("shade", "glass");
        placeholder.select("base".into(), Selection::Default);
        let ranked = vec![
            entry(1, Combination::new().with("shade", "paper").with("base", "oak"), Some(80.0)),
            entry(2, placeholder, None),
        ];

        let rendered = render_csv(&sample_box(), &ranked).expect("renders");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines[0],
            "rank,Shade,Base,compatibility,technical,innovation,principles,overall,constraints_satisfied"
        );
        assert_eq!(lines[1], "1,Rice paper,Oak,50.0,62.5,80.0,0.0,48.1,true");
        assert_eq!(lines[2], "2,Glass,Default,50.0,62.5,,0.0,37.5,true");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn filename_carries_the_generation_time() {
        let at = Utc
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(export_filename(&at), "combinations-20240309T140500Z.csv");
    }
}
