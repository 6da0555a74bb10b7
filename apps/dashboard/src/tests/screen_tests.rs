use super::*;
use crate::{commands::ListFlags, config::Settings};
use client_core::mock::mock_assets;
use list_core::SortDirection;
use shared::domain::{AssetId, AssetStatus};

fn screen() -> AssetsScreen {
    AssetsScreen::new(
        mock_assets(12),
        ListStateOptions::default()
            .with_sort(AssetSortKey::UpdatedAt, SortDirection::Desc)
            .with_page_size(5),
    )
}

fn visible_ids(screen: &AssetsScreen) -> Vec<String> {
    screen
        .visible()
        .rows
        .iter()
        .map(|row| row.id.to_string())
        .collect()
}

#[test]
fn starts_with_newest_assets_first() {
    let screen = screen();
    let page = screen.visible();
    assert_eq!(page.len(), 5);
    assert_eq!(page.total, 12);
    assert_eq!(page.rows[0].id, AssetId::from("asset-012"));
}

#[test]
fn sort_chip_flips_the_active_key_and_switches_others() {
    let mut screen = screen();

    assert_eq!(screen.handle(ScreenCommand::Sort(AssetSortKey::UpdatedAt)), Ok(Outcome::Render));
    assert_eq!(screen.list().sort_dir(), SortDirection::Asc);
    assert_eq!(visible_ids(&screen)[0], "asset-001");

    screen.handle(ScreenCommand::Sort(AssetSortKey::Score)).unwrap();
    assert_eq!(screen.list().sort_key(), Some(&AssetSortKey::Score));
    assert_eq!(screen.list().sort_dir(), SortDirection::Asc);
    assert_eq!(visible_ids(&screen)[0], "asset-012");
}

#[test]
fn sort_flag_sets_the_key_without_flipping_direction() {
    let mut screen = AssetsScreen::new(mock_assets(12), Settings::default().list_options());
    let flags = ListFlags {
        sort: Some(AssetSortKey::UpdatedAt),
        ..ListFlags::default()
    };
    for command in flags.into_commands() {
        screen.handle(command).unwrap();
    }
    assert_eq!(screen.list().sort_dir(), SortDirection::Desc);
    assert_eq!(visible_ids(&screen)[0], "asset-012");

    let flags = ListFlags {
        sort: Some(AssetSortKey::Score),
        dir: Some(SortDirection::Asc),
        ..ListFlags::default()
    };
    for command in flags.into_commands() {
        screen.handle(command).unwrap();
    }
    assert_eq!(screen.list().sort_key(), Some(&AssetSortKey::Score));
    assert_eq!(visible_ids(&screen)[0], "asset-012");
}

#[test]
fn key_command_clears_sorting() {
    let mut screen = screen();
    screen.handle(ScreenCommand::SortKey(None)).unwrap();
    assert_eq!(screen.list().sort_key(), None);
    assert_eq!(visible_ids(&screen)[0], "asset-001");
}

#[test]
fn load_more_walks_pages_then_reports_the_end() {
    let mut screen = screen();

    screen.handle(ScreenCommand::LoadMore).unwrap();
    assert_eq!(screen.visible().len(), 10);
    screen.handle(ScreenCommand::LoadMore).unwrap();
    assert_eq!(screen.visible().len(), 12);
    assert!(!screen.visible().can_load_more());

    assert_eq!(
        screen.handle(ScreenCommand::LoadMore),
        Ok(Outcome::Message("All assets are already shown.".into()))
    );
    assert_eq!(screen.list().page(), 3);
}

#[test]
fn filtering_rewinds_to_the_first_page() {
    let mut screen = screen();
    screen.handle(ScreenCommand::LoadMore).unwrap();

    screen.handle(ScreenCommand::Filter("berlin".into())).unwrap();
    assert_eq!(screen.list().page(), 1);
    assert_eq!(visible_ids(&screen), vec!["asset-008", "asset-002"]);

    screen.handle(ScreenCommand::Reset).unwrap();
    assert_eq!(screen.list().filter_text(), "");
    assert_eq!(screen.visible().total, 12);
}

#[test]
fn edits_update_the_row_in_place() {
    let mut screen = screen();
    let outcome = screen.handle(ScreenCommand::Edit {
        id: AssetId::from("asset-002"),
        name: Some("Edge Relay".into()),
        status: Some(AssetStatus::Error),
        score: None,
    });
    assert_eq!(outcome, Ok(Outcome::Message("Updated asset-002.".into())));

    let edited = &screen.rows()[1];
    assert_eq!(edited.name, "Edge Relay");
    assert_eq!(edited.status, AssetStatus::Error);
    assert_eq!(edited.score, 97.0);
    assert_eq!(screen.rows().len(), 12);

    screen.handle(ScreenCommand::Filter("relay".into())).unwrap();
    assert_eq!(visible_ids(&screen), vec!["asset-002"]);
}

#[test]
fn rejected_edits_leave_rows_untouched() {
    let mut screen = screen();
    let before = screen.rows().to_vec();

    let missing = screen
        .handle(ScreenCommand::Edit {
            id: AssetId::from("asset-999"),
            name: None,
            status: None,
            score: None,
        })
        .unwrap_err();
    assert_eq!(missing.code, ErrorCode::NotFound);

    let bad_score = screen
        .handle(ScreenCommand::Edit {
            id: AssetId::from("asset-001"),
            name: None,
            status: None,
            score: Some("lots".into()),
        })
        .unwrap_err();
    assert_eq!(bad_score.code, ErrorCode::Validation);

    let blank_name = screen
        .handle(ScreenCommand::Edit {
            id: AssetId::from("asset-001"),
            name: Some("   ".into()),
            status: None,
            score: None,
        })
        .unwrap_err();
    assert_eq!(blank_name.code, ErrorCode::Validation);

    assert_eq!(screen.rows(), before.as_slice());
}

#[test]
fn help_and_quit() {
    let mut screen = screen();
    assert!(matches!(
        screen.handle(ScreenCommand::Help),
        Ok(Outcome::Message(text)) if text.contains("load the next page")
    ));
    assert_eq!(screen.handle(ScreenCommand::Show), Ok(Outcome::Render));
    assert_eq!(screen.handle(ScreenCommand::Quit), Ok(Outcome::Quit));
}
