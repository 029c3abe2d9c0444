//! 対話式の点検入力
//!
//! 基本情報を入力したあと、劣化項目の追加・編集・削除・保存をメニューで繰り返す。

use super::InspectionSession;
use crate::error::{InspectError, Result};
use crate::store::RecordStore;
use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};
use inspect_common::{Finding, InspectionMetadata, MasterVocabulary, DATE_FORMAT};

/// 自由入力を選ぶ項目
const OTHER_CHOICE: &str = "その他（直接入力）";

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Add,
    Edit,
    Remove,
    List,
    Save,
    EditMetadata,
    Quit,
}

impl SessionAction {
    pub const ALL: [SessionAction; 7] = [
        SessionAction::Add,
        SessionAction::Edit,
        SessionAction::Remove,
        SessionAction::List,
        SessionAction::Save,
        SessionAction::EditMetadata,
        SessionAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SessionAction::Add => "劣化項目を追加",
            SessionAction::Edit => "劣化項目を編集",
            SessionAction::Remove => "劣化項目を削除",
            SessionAction::List => "入力済み劣化項目を表示",
            SessionAction::Save => "保存",
            SessionAction::EditMetadata => "基本情報を変更",
            SessionAction::Quit => "終了",
        }
    }
}

/// 選択肢マスタ一式
pub struct Vocabularies {
    pub locations: MasterVocabulary,
    pub deteriorations: MasterVocabulary,
}

/// 対話式の点検セッションを実行
pub fn run_session<S: RecordStore>(
    initial: InspectionMetadata,
    vocabularies: &Vocabularies,
    store: &mut S,
) -> Result<()> {
    println!("■ 基本情報");
    let metadata = prompt_metadata(&initial)?;
    let mut session = InspectionSession::new(metadata);

    loop {
        println!();
        let labels: Vec<&str> = SessionAction::ALL.iter().map(|a| a.label()).collect();
        let prompt = format!(
            "操作を選択（劣化項目 {}件 / 未保存 {}件）",
            session.draft().len(),
            session.unsaved_count()
        );
        let index = Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        let outcome = match SessionAction::ALL[index] {
            SessionAction::Add => add_finding(&mut session, vocabularies),
            SessionAction::Edit => edit_finding(&mut session, vocabularies),
            SessionAction::Remove => remove_finding(&mut session),
            SessionAction::List => {
                print_draft(&session);
                Ok(())
            }
            SessionAction::Save => save(&mut session, &mut *store),
            SessionAction::EditMetadata => {
                let metadata = prompt_metadata(session.metadata())?;
                session.set_metadata(metadata);
                println!("✔ 基本情報を更新しました（以降の保存から反映）");
                Ok(())
            }
            SessionAction::Quit => {
                if confirm_quit(&session)? {
                    break;
                }
                Ok(())
            }
        };

        // 入力ミス・古い位置指定はその場で知らせて続行する
        match outcome {
            Ok(()) => {}
            Err(e @ (InspectError::Validation(_) | InspectError::Index { .. } | InspectError::NoActiveEdit)) => {
                println!("⚠ {}", e);
            }
            Err(e @ InspectError::Persistence(_)) => {
                println!("⚠ {}", e);
                println!("  下書きはそのまま残っています。再度保存できます。");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

fn add_finding(session: &mut InspectionSession, vocabularies: &Vocabularies) -> Result<()> {
    let pending = session.draft().pending().clone();
    let location = prompt_choice("場所", &vocabularies.locations, &pending.location)?;
    let deterioration = prompt_choice("劣化名", &vocabularies.deteriorations, &pending.deterioration_type)?;
    let photo = prompt_text("写真番号", &pending.photo_reference)?;

    let finding = session.add_finding(&location, &deterioration, &photo)?;
    println!("✔ 劣化項目を追加しました: {}", describe(&finding));
    Ok(())
}

fn edit_finding(session: &mut InspectionSession, vocabularies: &Vocabularies) -> Result<()> {
    let Some(position) = select_finding(session, "編集する劣化項目")? else {
        return Ok(());
    };

    session.begin_edit(position)?;
    let pending = session.draft().pending().clone();
    let location = prompt_choice("場所", &vocabularies.locations, &pending.location)?;
    let deterioration = prompt_choice("劣化名", &vocabularies.deteriorations, &pending.deterioration_type)?;
    let photo = prompt_text("写真番号", &pending.photo_reference)?;

    match session.commit_edit(&location, &deterioration, &photo) {
        Ok(finding) => {
            println!("✔ 劣化項目を更新しました: {}", describe(&finding));
            Ok(())
        }
        Err(e) => {
            session.cancel_edit();
            Err(e)
        }
    }
}

fn remove_finding(session: &mut InspectionSession) -> Result<()> {
    let Some(position) = select_finding(session, "削除する劣化項目")? else {
        return Ok(());
    };

    let finding = session.draft().get(position)?.clone();
    let saved = session.is_saved(&finding);
    let prompt = if saved {
        format!("{} を削除しますか？（保存済みの行は点検データに残ります）", describe(&finding))
    } else {
        format!("{} を削除しますか？", describe(&finding))
    };
    if !Confirm::new().with_prompt(prompt).default(false).interact().map_err(prompt_error)? {
        return Ok(());
    }

    session.remove_finding(position)?;
    println!("✔ 劣化項目を削除しました");
    Ok(())
}

fn save<S: RecordStore>(session: &mut InspectionSession, store: &mut S) -> Result<()> {
    if session.draft().is_empty() {
        println!("⚠ 保存する劣化項目がありません。");
        return Ok(());
    }

    let report = session.commit(store)?;
    if report.written > 0 {
        println!("✔ {}件のデータを保存しました", report.written);
        if !report.duplicated_ids.is_empty() {
            let ids: Vec<String> = report.duplicated_ids.iter().map(|id| format!("No.{}", id)).collect();
            println!(
                "⚠ {} は保存後に編集されたため、新しい行として追記しました（以前の行は残っています）",
                ids.join(", ")
            );
        }
    } else {
        println!("保存するデータがありません。すべての項目は既に保存済みです。");
    }
    Ok(())
}

fn confirm_quit(session: &InspectionSession) -> Result<bool> {
    let unsaved = session.unsaved_count();
    if unsaved == 0 {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(format!("未保存の劣化項目が{}件あります。保存せずに終了しますか？", unsaved))
        .default(false)
        .interact()
        .map_err(prompt_error)
}

fn print_draft(session: &InspectionSession) {
    let findings = session.draft().findings();
    if findings.is_empty() {
        println!("入力済みの劣化項目はありません。");
        return;
    }

    println!("■ 入力済み劣化項目");
    for finding in findings {
        println!("{}", draft_line(finding, session.is_saved(finding)));
    }
}

/// 下書き一覧の1行
pub fn draft_line(finding: &Finding, saved: bool) -> String {
    let mark = if saved { "✅ 保存済" } else { "" };
    format!("{} {}", describe(finding), mark).trim_end().to_string()
}

fn describe(finding: &Finding) -> String {
    let photo = if finding.photo_reference.is_empty() {
        "-"
    } else {
        finding.photo_reference.as_str()
    };
    format!(
        "No.{} 場所: {} / 劣化名: {} / 写真番号: {}",
        finding.sequence_id, finding.location, finding.deterioration_type, photo
    )
}

fn select_finding(session: &InspectionSession, prompt: &str) -> Result<Option<usize>> {
    let findings = session.draft().findings();
    if findings.is_empty() {
        println!("入力済みの劣化項目はありません。");
        return Ok(None);
    }

    let mut items: Vec<String> = findings
        .iter()
        .map(|f| draft_line(f, session.is_saved(f)))
        .collect();
    items.push("（戻る）".to_string());

    let index = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()
        .map_err(prompt_error)?;

    Ok((index < findings.len()).then_some(index))
}

/// 選択肢の一覧と初期選択位置
///
/// マスタに無い現在値（直接入力されたもの）も選択肢に残す。
pub fn choice_items(master: &MasterVocabulary, current: &str) -> (Vec<String>, usize) {
    let mut items: Vec<String> = master.values().to_vec();
    if !current.is_empty() && !master.contains(current) {
        items.push(current.to_string());
    }
    let default = items.iter().position(|v| v == current).unwrap_or(0);
    items.push(OTHER_CHOICE.to_string());
    (items, default)
}

fn prompt_choice(label: &str, master: &MasterVocabulary, current: &str) -> Result<String> {
    let (items, default) = choice_items(master, current);
    let index = Select::new()
        .with_prompt(label)
        .items(&items)
        .default(default)
        .interact()
        .map_err(prompt_error)?;

    if index == items.len() - 1 {
        prompt_text(label, current)
    } else {
        Ok(items[index].clone())
    }
}

fn prompt_text(label: &str, initial: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}

fn prompt_metadata(initial: &InspectionMetadata) -> Result<InspectionMetadata> {
    let inspection_date = Input::<String>::new()
        .with_prompt("点検日 (YYYY-MM-DD)")
        .with_initial_text(initial.inspection_date.format(DATE_FORMAT).to_string())
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            parse_inspection_date(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_error)?;

    Ok(InspectionMetadata {
        inspection_date: parse_inspection_date(&inspection_date)?,
        inspector_name: prompt_text("点検者名", &initial.inspector_name)?,
        site_name: prompt_text("現場名", &initial.site_name)?,
        building_name: prompt_text("棟名", &initial.building_name)?,
        remarks: prompt_text("備考", &initial.remarks)?,
    })
}

/// 点検日をパース
pub fn parse_inspection_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| InspectError::Validation(format!("点検日の形式が不正です: {}", input)))
}

fn prompt_error(e: dialoguer::Error) -> InspectError {
    InspectError::Prompt(e.to_string())
}
