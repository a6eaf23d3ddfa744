use lichess_openings::export::{SummarySheet, export_summaries_xlsx};
use lichess_openings::summary::SummaryRow;

#[test]
fn writes_workbook_with_all_sheets() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("openings.xlsx");

    let openings = vec![
        SummaryRow {
            key: "Italian Game".to_string(),
            total_plays: 2,
            wins: 1,
            win_percentage: 50.0,
        },
        SummaryRow {
            key: "Italian Game: Giuoco Piano".to_string(),
            total_plays: 1,
            wins: 1,
            win_percentage: 100.0,
        },
    ];
    let families = vec![SummaryRow {
        key: "Italian Game".to_string(),
        total_plays: 3,
        wins: 2,
        win_percentage: 66.67,
    }];

    let report = export_summaries_xlsx(
        &path,
        &[
            SummarySheet {
                name: "Openings",
                key_header: "Opening",
                rows: &openings,
            },
            SummarySheet {
                name: "Families",
                key_header: "Opening Family",
                rows: &families,
            },
        ],
    )
    .expect("export should succeed");

    assert_eq!(report.sheets, 2);
    assert_eq!(report.rows, 3);
    let meta = std::fs::metadata(&path).expect("workbook written");
    assert!(meta.len() > 0);
}

#[test]
fn invalid_sheet_name_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bad.xlsx");
    let result = export_summaries_xlsx(
        &path,
        &[SummarySheet {
            name: "bad:name",
            key_header: "Opening",
            rows: &[],
        }],
    );
    assert!(result.is_err());
}
