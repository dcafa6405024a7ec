//! Tab creation, rename and close through the public shell API.

mod common;

use common::{BuildMode, MockUi, StubHandler, create_tabs, default_shell, shell_with, test_config};
use std::sync::atomic::Ordering;
use tabshell::config::TabKind;
use tabshell::kinds::HandlerSet;
use tabshell::shell::{CloseOutcome, RenameOutcome, ShellError, TabShell};
use tabshell::tab::LayoutError;

fn assert_consistent(shell: &TabShell) {
    assert!(shell.check_invariants());
    let mut strip_ids = shell.strip().ids();
    let mut registry_ids = shell.registry().all();
    strip_ids.sort_unstable();
    registry_ids.sort_unstable();
    assert_eq!(strip_ids, registry_ids);
}

#[test]
fn test_first_tabs_get_sequential_ids_and_labels() {
    let mut shell = default_shell();

    let first = shell.create(TabKind::Generic, None).unwrap();
    assert_eq!(first, 1);
    assert_eq!(shell.strip().ids(), vec![1]);
    assert_eq!(shell.strip().label(1), Some("New Tab #1"));

    let second = shell.create(TabKind::Generic, None).unwrap();
    assert_eq!(second, 2);
    assert_eq!(shell.strip().ids(), vec![1, 2]);
    assert_eq!(shell.active_tab_id(), Some(2));
    assert_eq!(shell.peek_next_id(), 3);
    assert_consistent(&shell);
}

#[test]
fn test_closed_ids_are_never_reissued() {
    let mut shell = default_shell();
    let ui = MockUi::new();
    create_tabs(&mut shell, TabKind::Generic, 2);

    shell.switch_to(1);
    assert_eq!(shell.close_active_tab(&ui), CloseOutcome::Closed(1));
    assert_eq!(shell.strip().ids(), vec![2]);
    assert!(!shell.registry().contains(1));

    let later = create_tabs(&mut shell, TabKind::Generic, 10);
    assert!(!later.contains(&1));
    assert_eq!(later.first(), Some(&3));
    assert!(later.windows(2).all(|w| w[0] < w[1]));
    assert_consistent(&shell);
}

#[test]
fn test_mixed_sequence_keeps_strip_and_registry_in_step() {
    let mut shell = default_shell();
    let ui = MockUi::new();

    let mut issued = Vec::new();
    for round in 0..4 {
        for kind in TabKind::all() {
            issued.push(shell.create(*kind, None).unwrap());
            assert_consistent(&shell);
        }
        shell.switch_to(issued[round]);
        let before = shell.tab_count();
        assert_eq!(shell.close_active_tab(&ui), CloseOutcome::Closed(issued[round]));
        assert_eq!(shell.tab_count(), before - 1);
        assert_consistent(&shell);
    }

    assert!(issued.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(shell.tab_count(), 8);
}

#[test]
fn test_explicit_label_is_trimmed_and_blank_falls_back() {
    let mut shell = default_shell();

    let named = shell.create(TabKind::Editor, Some("  Notes  ")).unwrap();
    let blank = shell.create(TabKind::Editor, Some("   ")).unwrap();

    assert_eq!(shell.strip().label(named), Some("Notes"));
    assert_eq!(shell.strip().label(blank), Some("New Tab #2"));
}

#[test]
fn test_records_carry_requested_kind() {
    let mut shell = default_shell();
    for kind in TabKind::all() {
        let id = shell.create(*kind, None).unwrap();
        let record = shell.record(id).unwrap();
        assert_eq!(record.kind(), *kind);
        assert_eq!(record.fields().kind(), *kind);
    }
    assert!(shell.record(2).unwrap().view().live_surfaces() == 2);
    assert!(shell.record(3).unwrap().task().is_some());
    assert!(shell.record(1).unwrap().task().is_none());
}

#[test]
fn test_rename_changes_only_the_strip_label() {
    let mut shell = default_shell();
    let id = shell.create(TabKind::Generic, None).unwrap();
    let fields_before = shell.record(id).unwrap().fields().clone();
    let ui = MockUi::new().answer_prompt(Some("  Sweep A "));

    assert_eq!(
        shell.rename_active_tab(&ui),
        RenameOutcome::Renamed("Sweep A".to_string())
    );
    assert_eq!(shell.strip().label(id), Some("Sweep A"));
    assert_eq!(shell.record(id).unwrap().fields(), &fields_before);
    assert_eq!(shell.tab_count(), 1);
}

#[test]
fn test_rename_cancelled_or_blank_keeps_label() {
    let mut shell = default_shell();
    let id = shell.create(TabKind::Generic, None).unwrap();
    let ui = MockUi::new().answer_prompt(None).answer_prompt(Some("   "));

    assert_eq!(shell.rename_active_tab(&ui), RenameOutcome::Cancelled);
    assert_eq!(shell.rename_active_tab(&ui), RenameOutcome::Ignored);
    assert_eq!(shell.strip().label(id), Some("New Tab #1"));
    assert!(ui.notices().is_empty());
}

#[test]
fn test_prompted_rename_stays_on_its_tab_after_a_switch() {
    let mut shell = default_shell();
    let ids = create_tabs(&mut shell, TabKind::Generic, 2);
    let (first, second) = (ids[0], ids[1]);
    assert_eq!(shell.active_tab_id(), Some(second));
    let ui = MockUi::new().answer_prompt(Some("Kept"));

    // Prompt opened for the first tab, user then clicks the second
    shell.switch_to(first);
    let target = shell.active_tab_id().unwrap();
    shell.switch_to(second);

    assert_eq!(
        shell.rename_tab_with_prompt(target, &ui),
        RenameOutcome::Renamed("Kept".to_string())
    );
    assert_eq!(shell.strip().label(first), Some("Kept"));
    assert_eq!(shell.strip().label(second), Some("New Tab #2"));
    assert_eq!(shell.active_tab_id(), Some(second));
}

#[test]
fn test_prompted_rename_of_closed_tab_asks_nothing() {
    let mut shell = default_shell();
    let ids = create_tabs(&mut shell, TabKind::Generic, 2);
    shell.destroy_tab(ids[0]).unwrap();
    let ui = MockUi::new().answer_prompt(Some("Ghost"));

    assert_eq!(shell.rename_tab_with_prompt(ids[0], &ui), RenameOutcome::Failed);
    assert_eq!(ui.questions_asked(), 0);
    assert_eq!(ui.warnings().len(), 1);
    assert_eq!(shell.strip().label(ids[1]), Some("New Tab #2"));
}

#[test]
fn test_rename_without_tabs_asks_nothing() {
    let mut shell = default_shell();
    let ui = MockUi::new();

    assert_eq!(shell.rename_active_tab(&ui), RenameOutcome::NoActiveTab);
    assert_eq!(ui.questions_asked(), 0);
}

#[test]
fn test_rename_unknown_tab_is_an_error() {
    let mut shell = default_shell();
    shell.create(TabKind::Generic, None).unwrap();

    assert!(matches!(
        shell.rename_tab(42, "x"),
        Err(ShellError::UnknownTab(42))
    ));
}

#[test]
fn test_close_declined_changes_nothing() {
    let mut shell = default_shell();
    create_tabs(&mut shell, TabKind::Editor, 2);
    let ui = MockUi::new().answer_confirm(false);

    assert_eq!(shell.close_active_tab(&ui), CloseOutcome::Cancelled);
    assert_eq!(shell.strip().ids(), vec![1, 2]);
    assert_eq!(shell.record(2).unwrap().view().live_surfaces(), 2);
    assert_eq!(shell.active_tab_id(), Some(2));
}

#[test]
fn test_close_without_confirmation_when_disabled() {
    let mut config = test_config();
    config.confirm_close_tab = false;
    let mut shell = TabShell::new(config, HandlerSet::with_defaults());
    shell.create(TabKind::Generic, None).unwrap();
    let ui = MockUi::new();

    assert_eq!(shell.close_active_tab(&ui), CloseOutcome::Closed(1));
    assert_eq!(ui.questions_asked(), 0);
}

#[test]
fn test_close_unknown_tab_warns_and_changes_nothing() {
    let mut shell = default_shell();
    shell.create(TabKind::Generic, None).unwrap();
    let ui = MockUi::new();

    assert_eq!(shell.close_tab(9, &ui), CloseOutcome::Failed);
    assert_eq!(shell.tab_count(), 1);
    assert_eq!(ui.warnings().len(), 1);
    assert_eq!(ui.questions_asked(), 0);
}

#[test]
fn test_close_with_no_tabs() {
    let mut shell = default_shell();
    let ui = MockUi::new();
    assert_eq!(shell.close_active_tab(&ui), CloseOutcome::NoActiveTab);
}

#[test]
fn test_close_releases_surfaces_through_handler() {
    let handler = StubHandler::new(TabKind::Editor).with_surfaces(3);
    let teardowns = handler.teardowns.clone();
    let mut shell = shell_with(handler);
    let id = shell.create(TabKind::Editor, None).unwrap();

    let teardown = shell.destroy_tab(id).unwrap();
    assert_eq!(teardown.surfaces_released, 3);
    assert!(!teardown.task_cancelled);
    assert_eq!(teardowns.load(Ordering::SeqCst), 1);
    assert!(shell.strip().is_empty());
}

#[test]
fn test_closing_active_tab_selects_a_neighbour() {
    let mut shell = default_shell();
    create_tabs(&mut shell, TabKind::Generic, 3);
    let ui = MockUi::new();

    shell.switch_to(2);
    shell.close_active_tab(&ui);
    let active = shell.active_tab_id().unwrap();
    assert!(active == 1 || active == 3);

    shell.close_active_tab(&ui);
    shell.close_active_tab(&ui);
    assert_eq!(shell.active_tab_id(), None);
    assert_consistent(&shell);
}

#[test]
fn test_failed_constructions_leave_nothing_behind() {
    for mode in [
        BuildMode::Fail,
        BuildMode::Panic,
        BuildMode::OverlappingLayout,
        BuildMode::OutOfRangeLayout,
        BuildMode::WrongFields,
    ] {
        let mut shell = shell_with(
            StubHandler::new(TabKind::Generic)
                .build_mode(mode)
                .with_surfaces(1),
        );
        let ui = MockUi::new();

        assert_eq!(shell.create_tab(TabKind::Generic, None, &ui), None, "{mode:?}");
        assert_eq!(shell.tab_count(), 0, "{mode:?}");
        assert!(shell.strip().is_empty(), "{mode:?}");
        assert_eq!(ui.errors().len(), 1, "{mode:?}");
        assert!(ui.errors()[0].starts_with("Failed to build new tab"));
        // The failed attempt consumed id 1
        assert_eq!(shell.peek_next_id(), 2, "{mode:?}");
    }
}

#[test]
fn test_out_of_range_layout_is_reported_not_raised() {
    let mut shell = shell_with(
        StubHandler::new(TabKind::Generic)
            .build_mode(BuildMode::OutOfRangeLayout)
            .with_surfaces(2),
    );
    let ui = MockUi::new();

    assert!(matches!(
        shell.create(TabKind::Generic, None),
        Err(ShellError::Layout(LayoutError::OutOfRange { widget: "other", .. }))
    ));
    assert_eq!(shell.create_tab(TabKind::Generic, None, &ui), None);
    assert_eq!(ui.errors().len(), 1);
    assert_eq!(shell.tab_count(), 0);
    assert!(shell.check_invariants());

    // The shell stays usable afterwards
    let mut shell = default_shell();
    assert!(shell.create_tab(TabKind::Generic, None, &ui).is_some());
}

#[test]
fn test_construction_failure_reports_reason() {
    let mut shell = shell_with(StubHandler::new(TabKind::Generic).build_mode(BuildMode::Panic));

    let err = shell.create(TabKind::Generic, None).unwrap_err();
    match err {
        ShellError::ConstructionFailure { kind, reason } => {
            assert_eq!(kind, TabKind::Generic);
            assert!(reason.contains("stub build exploded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_handler_is_a_construction_failure() {
    let mut shell = shell_with(StubHandler::new(TabKind::Generic));
    assert!(matches!(
        shell.create(TabKind::Processor, None),
        Err(ShellError::ConstructionFailure {
            kind: TabKind::Processor,
            ..
        })
    ));
}

#[test]
fn test_tab_limit_warns() {
    let mut config = test_config();
    config.max_tabs = 2;
    let mut shell = TabShell::new(config, HandlerSet::with_defaults());
    let ui = MockUi::new();

    assert!(shell.create_tab(TabKind::Generic, None, &ui).is_some());
    assert!(shell.create_tab(TabKind::Generic, None, &ui).is_some());
    assert_eq!(shell.create_tab(TabKind::Generic, None, &ui), None);
    assert_eq!(shell.tab_count(), 2);
    assert_eq!(ui.warnings(), vec!["Cannot open more than 2 tabs".to_string()]);
    assert!(ui.errors().is_empty());
}

#[test]
fn test_navigation_and_reorder() {
    let mut shell = default_shell();
    create_tabs(&mut shell, TabKind::Generic, 3);

    shell.next_tab();
    assert_eq!(shell.active_tab_id(), Some(1));
    shell.prev_tab();
    assert_eq!(shell.active_tab_id(), Some(3));

    assert!(shell.move_tab_to_index(3, 0));
    assert_eq!(shell.strip().ids(), vec![3, 1, 2]);
    assert_consistent(&shell);
}
