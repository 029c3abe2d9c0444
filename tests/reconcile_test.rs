//! 保存処理の統合テスト
//!
//! 実ファイル（CSV）に対して下書きリストの保存を検証

use inspect_common::InspectionMetadata;
use inspect_rust::session::InspectionSession;
use inspect_rust::store::{CsvFileStore, MemoryStore, RecordStore};
use tempfile::tempdir;

fn metadata() -> InspectionMetadata {
    InspectionMetadata {
        inspection_date: "2026-10-19".parse().unwrap(),
        inspector_name: "山田太郎".to_string(),
        site_name: "中央団地".to_string(),
        building_name: "A棟".to_string(),
        remarks: "定期点検".to_string(),
    }
}

/// 追加 → 保存 → 再保存 → 編集 → 保存 のシナリオ
#[test]
fn test_add_commit_edit_commit_scenario() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = CsvFileStore::new(dir.path().join("inspection_data.csv"));
    let mut session = InspectionSession::new(metadata());

    session.add_finding("1F Corridor", "Crack", "P-001").expect("追加失敗");

    let first = session.commit(&mut store).expect("保存失敗");
    assert_eq!(first.written, 1);
    assert_eq!(store.read_all().unwrap().len(), 1);

    let second = session.commit(&mut store).expect("保存失敗");
    assert_eq!(second.written, 0);

    session.begin_edit(0).expect("編集開始失敗");
    session.commit_edit("1F Corridor", "Crack", "P-002").expect("編集失敗");

    let third = session.commit(&mut store).expect("保存失敗");
    assert_eq!(third.written, 1);
    assert_eq!(third.duplicated_ids, vec![1]);

    let rows = store.read_all().unwrap();
    assert_eq!(rows.len(), 2);
    // 同じ劣化番号の行が2つ、古い内容はそのまま
    assert_eq!(rows[0].finding.sequence_id, 1);
    assert_eq!(rows[0].finding.photo_reference, "P-001");
    assert_eq!(rows[1].finding.sequence_id, 1);
    assert_eq!(rows[1].finding.photo_reference, "P-002");
    assert_eq!(rows[1].metadata, metadata());
}

/// 変更なしの再保存はファイルをバイト単位で変えない
#[test]
fn test_second_commit_leaves_file_byte_identical() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("inspection_data.csv");
    let mut store = CsvFileStore::new(&path);
    let mut session = InspectionSession::new(metadata());

    session.add_finding("屋上", "漏水", "P-010").unwrap();
    session.add_finding("外壁", "ひび割れ", "").unwrap();
    session.commit(&mut store).expect("保存失敗");

    let before = std::fs::read(&path).unwrap();
    let modified_before = std::fs::metadata(&path).unwrap().modified().unwrap();

    assert_eq!(session.commit(&mut store).unwrap().written, 0);

    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), modified_before);
}

/// 空の下書きではファイルを作らない
#[test]
fn test_commit_empty_draft_never_creates_store() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("inspection_data.csv");
    let mut store = CsvFileStore::new(&path);
    let mut session = InspectionSession::new(metadata());

    assert_eq!(session.commit(&mut store).unwrap().written, 0);
    assert!(!path.exists(), "保存するものが無いのにファイルが作られた");
}

/// 全件保存済みならストアに書き込まない
#[test]
fn test_commit_all_saved_never_writes() {
    let mut store = MemoryStore::new();
    let mut session = InspectionSession::new(metadata());
    session.add_finding("階段", "さび", "P-3").unwrap();
    session.commit(&mut store).unwrap();
    assert_eq!(store.write_count(), 1);

    session.commit(&mut store).unwrap();
    session.commit(&mut store).unwrap();
    assert_eq!(store.write_count(), 1);
}

/// 未保存の項目を編集して保存すると1行だけ
#[test]
fn test_edit_unsaved_then_commit_writes_one_row() {
    let mut store = MemoryStore::new();
    let mut session = InspectionSession::new(metadata());
    session.add_finding("玄関", "変色", "P-1").unwrap();
    session.begin_edit(0).unwrap();
    session.commit_edit("玄関", "変色", "P-2").unwrap();

    assert_eq!(session.commit(&mut store).unwrap().written, 1);
    assert_eq!(store.records().len(), 1);
    assert_eq!(store.records()[0].finding.photo_reference, "P-2");
}

/// 保存済みの項目を削除してもストアの行は残る
#[test]
fn test_remove_saved_keeps_store_row() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = CsvFileStore::new(dir.path().join("inspection_data.csv"));
    let mut session = InspectionSession::new(metadata());
    session.add_finding("機械室", "腐食", "P-7").unwrap();
    session.add_finding("駐車場", "欠損", "P-8").unwrap();
    session.commit(&mut store).unwrap();

    let removed = session.remove_finding(0).expect("削除失敗");
    assert!(!session.is_saved(&removed));
    assert_eq!(session.unsaved_count(), 0);

    assert_eq!(session.commit(&mut store).unwrap().written, 0);
    let rows = store.read_all().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].finding.location, "機械室");
}

/// 劣化番号は削除後も再利用しない
#[test]
fn test_sequence_ids_never_reused() {
    let mut session = InspectionSession::new(metadata());
    for _ in 0..3 {
        session.add_finding("屋上", "漏水", "").unwrap();
    }
    session.remove_finding(2).unwrap();
    session.remove_finding(0).unwrap();
    let next = session.add_finding("外壁", "剥離", "").unwrap();

    assert_eq!(next.sequence_id, 4);
    let ids: Vec<u32> = session.draft().findings().iter().map(|f| f.sequence_id).collect();
    assert_eq!(ids, vec![2, 4]);
}

/// 書き込み失敗後も下書きと保存済み状態は変わらず、再試行できる
#[test]
fn test_failed_commit_is_retryable() {
    let mut store = MemoryStore::new();
    let mut session = InspectionSession::new(metadata());
    session.add_finding("屋上", "漏水", "P-1").unwrap();

    store.fail_writes(true);
    assert!(session.commit(&mut store).is_err());
    assert_eq!(session.unsaved_count(), 1);
    assert_eq!(session.draft().len(), 1);

    store.fail_writes(false);
    assert_eq!(session.commit(&mut store).unwrap().written, 1);
}

/// 基本情報の変更は以降に保存する行だけに反映される
#[test]
fn test_metadata_change_applies_to_later_rows() {
    let mut store = MemoryStore::new();
    let mut session = InspectionSession::new(metadata());
    session.add_finding("屋上", "漏水", "P-1").unwrap();
    session.commit(&mut store).unwrap();

    let mut changed = metadata();
    changed.building_name = "B棟".to_string();
    session.set_metadata(changed);
    session.add_finding("屋上", "さび", "P-2").unwrap();
    session.commit(&mut store).unwrap();

    let rows = store.records();
    assert_eq!(rows[0].metadata.building_name, "A棟");
    assert_eq!(rows[1].metadata.building_name, "B棟");
}
