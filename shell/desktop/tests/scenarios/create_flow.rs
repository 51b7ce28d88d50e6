use rstest::rstest;

use super::super::harness::{HostCall, TestHarness};
use crate::model::tab_group::TabGroupColor;
use crate::prefs::EditorPrefs;
use crate::services::tab_strip::TabGroupStore;
use crate::shell::desktop::host::popup::{PopupAnchor, PopupPosition};
use crate::shell::desktop::ui::tab_group_editor::{
    EditorAction, EditorMode, SWATCH_GROUP_NAME, TabGroupEditorEvent,
};

#[tokio::test]
async fn open_create_modal_binds_group_and_anchors_popup() {
    let mut harness = TestHarness::new();
    let tabs = harness.open_tabs(2);
    let group = harness.create_group(&tabs, TabGroupColor::Orange);

    harness.open_create(group);

    assert_eq!(harness.editor.mode(), EditorMode::Create);
    assert_eq!(harness.editor.active_group(), Some(group));
    assert!(harness.editor.keeps_newly_created_group());
    assert_eq!(harness.editor.name_field(), "");
    assert_eq!(harness.editor.swatches().checked(), Some(TabGroupColor::Orange));
    assert_eq!(
        harness.host.calls,
        vec![HostCall::Open {
            anchor: PopupAnchor::GroupLabel(group),
            position: PopupPosition::BottomLeftTopLeft,
        }]
    );
    assert!(!harness.editor.name_field_focused());

    harness.finish_transition();

    assert!(harness.editor.name_field_focused());
    assert_eq!(harness.host.calls.last(), Some(&HostCall::FocusNameField));
}

#[rstest]
#[case(false, true, PopupPosition::BottomLeftTopLeft)]
#[case(true, true, PopupPosition::TopLeftTopRight)]
#[case(true, false, PopupPosition::TopRightTopLeft)]
#[tokio::test]
async fn popup_position_follows_sidebar_prefs(
    #[case] vertical_tabs: bool,
    #[case] position_start: bool,
    #[case] expected: PopupPosition,
) {
    let mut prefs = EditorPrefs::default();
    prefs.sidebar.vertical_tabs = vertical_tabs;
    prefs.sidebar.position_start = position_start;
    let mut harness = TestHarness::with_prefs(&prefs);
    let tabs = harness.open_tabs(1);
    let group = harness.create_group(&tabs, TabGroupColor::Blue);

    harness.open_create(group);

    assert!(matches!(
        harness.host.calls.first(),
        Some(HostCall::Open { position, .. }) if *position == expected
    ));
}

#[tokio::test]
async fn done_keeps_group_and_announces_it() {
    let mut harness = TestHarness::new();
    let events = harness.editor.subscribe();
    let tabs = harness.open_tabs(2);
    let group = harness.create_group(&tabs, TabGroupColor::Green);

    harness.open_create(group);
    harness.finish_transition();
    harness.with_editor(|editor, ctx| editor.on_done_clicked(ctx));
    harness.finish_transition();

    assert!(harness.group(group).is_some());
    assert_eq!(harness.store.ungroup_calls(group), 0);
    assert_eq!(events.try_recv(), Ok(TabGroupEditorEvent::CreateCommitted(group)));
    assert!(!harness.editor.is_open());
}

#[tokio::test]
async fn cancel_then_hide_ungroups_exactly_once() {
    let mut harness = TestHarness::new();
    let events = harness.editor.subscribe();
    let tabs = harness.open_tabs(2);
    let group = harness.create_group(&tabs, TabGroupColor::Green);

    harness.open_create(group);
    harness.finish_transition();
    harness.with_editor(|editor, ctx| editor.on_cancel_clicked(ctx));

    // Nothing is dissolved until the host reports the popup hidden.
    assert!(harness.group(group).is_some());

    harness.finish_transition();

    assert_eq!(harness.store.ungroup_calls(group), 1);
    assert!(harness.group(group).is_none());
    assert_eq!(harness.store.open_tab_count(), 2);
    assert!(events.try_recv().is_err());
    assert!(!harness.editor.is_open());
}

#[tokio::test]
async fn outside_dismissal_keeps_group_even_after_an_earlier_cancel() {
    let mut harness = TestHarness::new();
    let tabs = harness.open_tabs(2);
    let discarded = harness.create_group(&tabs[..1], TabGroupColor::Blue);
    let kept = harness.create_group(&tabs[1..], TabGroupColor::Purple);

    harness.open_create(discarded);
    harness.finish_transition();
    harness.with_editor(|editor, ctx| editor.close(ctx, false));
    harness.finish_transition();
    assert!(harness.group(discarded).is_none());

    harness.open_create(kept);
    harness.finish_transition();
    harness.dismiss_by_outside_click();

    assert!(harness.group(kept).is_some());
    assert_eq!(harness.store.ungroup_calls(kept), 0);
}

#[tokio::test]
async fn showing_resets_a_discard_requested_before_the_popup_appeared() {
    let mut harness = TestHarness::new();
    let tabs = harness.open_tabs(1);
    let group = harness.create_group(&tabs, TabGroupColor::Blue);

    harness.open_create(group);
    harness.with_editor(|editor, ctx| editor.close(ctx, false));
    assert!(!harness.editor.keeps_newly_created_group());

    // The host still finishes showing before it processes the hide.
    harness.with_editor(|editor, ctx| editor.on_host_shown(ctx));

    assert!(harness.editor.keeps_newly_created_group());
}

#[tokio::test]
async fn typing_writes_every_keystroke_through_to_the_group() {
    let mut harness = TestHarness::new();
    let tabs = harness.open_tabs(1);
    let group = harness.create_group(&tabs, TabGroupColor::Blue);
    harness.open_create(group);
    harness.finish_transition();

    let mut observed = Vec::new();
    for typed in ["W", "Wo", "Wor", "Work"] {
        harness.with_editor(|editor, ctx| editor.on_name_input(ctx, typed));
        observed.push(harness.group(group).unwrap().label.clone());
    }

    assert_eq!(observed, vec!["W", "Wo", "Wor", "Work"]);
    assert_eq!(harness.editor.name_field(), "Work");

    harness.with_editor(|editor, ctx| editor.on_name_input(ctx, ""));
    assert_eq!(harness.group(group).unwrap().label, "");
}

#[tokio::test]
async fn swatch_selection_recolors_the_group_immediately() {
    let mut harness = TestHarness::new();
    let tabs = harness.open_tabs(1);
    let group = harness.create_group(&tabs, TabGroupColor::Blue);
    harness.open_create(group);

    harness.with_editor(|editor, ctx| editor.select_color(ctx, TabGroupColor::Red));
    assert_eq!(harness.group(group).unwrap().color, TabGroupColor::Red);
    assert_eq!(harness.editor.swatches().checked(), Some(TabGroupColor::Red));

    harness.with_editor(|editor, ctx| editor.on_swatch_change(ctx, SWATCH_GROUP_NAME, "cyan"));
    assert_eq!(harness.group(group).unwrap().color, TabGroupColor::Cyan);

    harness.with_editor(|editor, ctx| editor.on_swatch_change(ctx, "tab-group-name", "pink"));
    harness.with_editor(|editor, ctx| editor.on_swatch_change(ctx, SWATCH_GROUP_NAME, "teal"));
    assert_eq!(harness.group(group).unwrap().color, TabGroupColor::Cyan);
}

#[tokio::test]
async fn hiding_unbinds_and_resets_widgets() {
    let mut harness = TestHarness::new();
    let tabs = harness.open_tabs(1);
    let group = harness.create_group(&tabs, TabGroupColor::Yellow);
    harness.open_create(group);
    harness.finish_transition();
    harness.with_editor(|editor, ctx| editor.on_name_input(ctx, "Trip"));
    let generation = harness.editor.generation();

    harness.with_editor(|editor, ctx| editor.close(ctx, true));
    harness.finish_transition();

    assert_eq!(harness.editor.active_group(), None);
    assert_eq!(harness.editor.name_field(), "");
    assert_eq!(harness.editor.swatches().checked(), None);
    assert!(!harness.editor.name_field_focused());

    // Edits after unbinding go nowhere.
    harness.with_editor(|editor, ctx| editor.on_name_input(ctx, "Ghost"));
    assert_eq!(harness.group(group).unwrap().label, "Trip");

    harness.open_create(group);
    assert_eq!(harness.editor.generation(), generation + 1);
    assert_eq!(harness.editor.name_field(), "Trip");
}

#[tokio::test]
async fn edit_actions_are_ignored_in_create_mode() {
    let mut harness = TestHarness::new();
    let tabs = harness.open_tabs(2);
    let group = harness.create_group(&tabs[..1], TabGroupColor::Blue);
    harness.open_create(group);

    for action in EditorAction::ALL {
        harness.with_editor(|editor, ctx| editor.trigger_action(ctx, action));
    }

    assert!(harness.store.calls.is_empty());
    assert!(harness.group(group).is_some());
    assert_eq!(harness.store.open_tab_count(), 2);
}

#[tokio::test]
async fn opening_for_a_missing_group_does_nothing() {
    let mut harness = TestHarness::new();
    let tabs = harness.open_tabs(1);
    let group = harness.create_group(&tabs, TabGroupColor::Blue);
    harness.store.remove_tab_group(group);
    harness.store.calls.clear();

    harness.open_create(group);

    assert!(!harness.editor.is_open());
    assert!(harness.host.calls.is_empty());
    assert_eq!(harness.editor.generation(), 0);
}

#[tokio::test]
async fn reopening_before_the_cancelled_popup_hides_still_ungroups_it() {
    let mut harness = TestHarness::new();
    let events = harness.editor.subscribe();
    let tabs = harness.open_tabs(2);
    let cancelled = harness.create_group(&tabs[..1], TabGroupColor::Blue);
    let next = harness.create_group(&tabs[1..], TabGroupColor::Purple);

    harness.open_create(cancelled);
    harness.finish_transition();
    harness.with_editor(|editor, ctx| editor.on_cancel_clicked(ctx));
    harness.open_create(next);

    assert_eq!(harness.store.ungroup_calls(cancelled), 1);
    assert!(harness.group(cancelled).is_none());

    // The host reports the cancelled popup hidden only now.
    harness.with_editor(|editor, ctx| editor.on_host_hidden(ctx));

    assert_eq!(harness.store.ungroup_calls(cancelled), 1);
    assert_eq!(harness.editor.active_group(), Some(next));
    assert_eq!(harness.editor.mode(), EditorMode::Create);
    assert!(events.try_recv().is_err());

    harness.finish_transition();
    harness.with_editor(|editor, ctx| editor.on_done_clicked(ctx));
    harness.finish_transition();

    assert!(harness.group(next).is_some());
    assert_eq!(harness.store.ungroup_calls(next), 0);
    assert_eq!(events.try_recv(), Ok(TabGroupEditorEvent::CreateCommitted(next)));
    assert!(!harness.editor.is_open());
}

#[tokio::test]
async fn reopening_over_a_kept_group_commits_it_once() {
    let mut harness = TestHarness::new();
    let events = harness.editor.subscribe();
    let tabs = harness.open_tabs(2);
    let kept = harness.create_group(&tabs[..1], TabGroupColor::Green);
    let other = harness.create_group(&tabs[1..], TabGroupColor::Red);

    harness.open_create(kept);
    harness.finish_transition();
    harness.with_editor(|editor, ctx| editor.on_done_clicked(ctx));
    harness.open_edit(other);
    harness.with_editor(|editor, ctx| editor.on_host_hidden(ctx));

    assert_eq!(events.try_recv(), Ok(TabGroupEditorEvent::CreateCommitted(kept)));
    assert!(events.try_recv().is_err());
    assert!(harness.group(kept).is_some());
    assert_eq!(harness.editor.active_group(), Some(other));
    assert_eq!(harness.editor.mode(), EditorMode::Edit);
}
