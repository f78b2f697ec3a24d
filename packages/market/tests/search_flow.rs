mod common;

use common::*;
use market_core::domains::markdown::{export_csv, render, ExportError};
use market_core::domains::search::{
    GroundingSource, LoadingState, SearchError, SearchMode, SearchRequest, WebSource,
    MAX_EXCLUDED_NAMES, MORE_RESULTS_HEADING,
};
use market_core::kernel::MockSearchModel;

fn web(uri: &str) -> GroundingSource {
    GroundingSource {
        web: Some(WebSource {
            uri: Some(uri.to_string()),
            title: None,
        }),
        maps: None,
    }
}

#[tokio::test]
async fn leads_search_renders_rows_and_exports_csv() {
    let model = MockSearchModel::new()
        .with_grounded_text(KOPI_BANDUNG_LEADS, vec![web("https://maps.google.com/?cid=1")]);
    let mut session = session_with(&model);

    let response = session
        .search(SearchRequest::new(SearchMode::Leads, "Kopi Robusta", "Bandung"))
        .await
        .unwrap()
        .clone();

    assert_eq!(session.state(), LoadingState::Success);
    assert_eq!(response.grounding_sources.len(), 1);

    let doc = render(&response.markdown_text);
    assert_eq!(doc.row_count(), 3);
    let names: Vec<&str> = doc.rows().map(|row| row.lead.name.as_str()).collect();
    assert_eq!(names, vec!["Kafe Senja", "Warung Kopi Pojok", "Hotel Asri"]);
    for row in doc.rows() {
        assert!(doc.lead(row.action).is_some());
    }

    let csv = export_csv(&response.markdown_text).unwrap();
    let body = csv.strip_prefix('\u{FEFF}').unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        r#""Nama Bisnis","Kontak (Telp/WA)","Alamat Lengkap","Alasan Prospek""#
    );
    assert!(lines[1].starts_with(r#""Kafe Senja","0812-1111-2222""#));

    let call = &model.calls()[0];
    assert!(call.prompt.contains("\"Kopi Robusta\""));
    assert!(call.prompt.contains("di area \"Bandung\""));
}

#[tokio::test]
async fn load_more_merges_batches_and_sources() {
    let model = MockSearchModel::new()
        .with_grounded_text(KOPI_BANDUNG_LEADS, vec![web("https://a"), web("https://b")])
        .with_grounded_text(KOPI_LEMBANG_LEADS, vec![web("https://a")]);
    let mut session = session_with(&model);
    session
        .search(SearchRequest::new(SearchMode::Leads, "Kopi Robusta", "Bandung"))
        .await
        .unwrap();

    let merged = session.load_more().await.unwrap().clone();

    assert_eq!(
        merged.markdown_text,
        format!("{}{}{}", KOPI_BANDUNG_LEADS, MORE_RESULTS_HEADING, KOPI_LEMBANG_LEADS)
    );
    assert_eq!(
        merged.grounding_sources,
        vec![web("https://a"), web("https://b"), web("https://a")]
    );
    assert_eq!(render(&merged.markdown_text).row_count(), 4);

    let follow_up = &model.calls()[1];
    assert!(follow_up.prompt.contains(
        "JANGAN sertakan bisnis berikut karena sudah ada di hasil sebelumnya: Kafe Senja, Warung Kopi Pojok, Hotel Asri."
    ));
    assert!(follow_up
        .prompt
        .contains("(Silakan cari radius yang lebih luas hingga ke area sekitarnya)"));
}

#[tokio::test]
async fn short_follow_up_is_rejected_and_results_stay() {
    let model = MockSearchModel::new()
        .with_text(KOPI_BANDUNG_LEADS)
        .with_text("Maaf, tidak ada data lagi.");
    let mut session = session_with(&model);
    session
        .search(SearchRequest::new(SearchMode::Leads, "Kopi Robusta", "Bandung"))
        .await
        .unwrap();

    let error = session.load_more().await.unwrap_err();

    assert_eq!(error, SearchError::NoAdditionalData);
    assert_eq!(
        error.to_string(),
        "Tidak ditemukan data tambahan yang valid di area sekitar."
    );
    assert_eq!(session.data().unwrap().markdown_text, KOPI_BANDUNG_LEADS);
}

#[tokio::test]
async fn follow_up_exclusions_are_capped() {
    let many: String = std::iter::once("| Nama Bisnis | Kontak |\n|---|---|\n".to_string())
        .chain((0..60).map(|i| format!("| Toko Nomor {:02} | 08{:08} |\n", i, i)))
        .collect();
    let model = MockSearchModel::new()
        .with_text(&many)
        .with_text(KOPI_LEMBANG_LEADS);
    let mut session = session_with(&model);
    session
        .search(SearchRequest::new(SearchMode::Leads, "Kopi", "Bandung"))
        .await
        .unwrap();

    session.load_more().await.unwrap();

    let prompt = &model.calls()[1].prompt;
    let listed = prompt
        .split("sudah ada di hasil sebelumnya: ")
        .nth(1)
        .and_then(|rest| rest.split(".\n").next())
        .unwrap();
    assert_eq!(listed.split(", ").count(), MAX_EXCLUDED_NAMES);
    assert!(listed.starts_with("Toko Nomor 00"));
    assert!(!prompt.contains("Toko Nomor 40"));
}

#[tokio::test]
async fn upstream_failure_is_reported_in_indonesian() {
    let model = MockSearchModel::new().with_failure("API key not valid");
    let mut session = session_with(&model);

    let error = session
        .search(SearchRequest::new(SearchMode::Suppliers, "Gula Aren", "Garut"))
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "Gagal mengambil data: API key not valid");
    assert_eq!(session.state(), LoadingState::Error);
    assert!(session.data().is_none());
}

#[test]
fn one_line_table_renders_nothing_and_exports_nothing() {
    let text = "Intro\n| Nama Bisnis | Kontak |\nOutro";

    assert_eq!(render(text).tables().count(), 0);
    assert!(matches!(export_csv(text), Err(ExportError::NoRows)));
    assert!(matches!(
        export_csv("|---|---|\n|:--|--:|"),
        Err(ExportError::NoRows)
    ));
}

#[test]
fn column_roles_do_not_depend_on_order() {
    let text = "\
| Alasan Prospek | Alamat Lengkap | Kontak (Telp/WA) | Nama Bisnis |
|---|---|---|---|
| Butuh kopi | Jl. Braga 1 | 0812 | Kafe Senja |";

    let doc = render(text);
    let lead = &doc.rows().next().unwrap().lead;

    assert_eq!(lead.name, "Kafe Senja");
    assert_eq!(lead.contact, "0812");
    assert_eq!(lead.location, "Jl. Braga 1");
    assert_eq!(lead.reason, "Butuh kopi");
}
