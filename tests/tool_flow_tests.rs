use glam::Vec3;
use node_controller::app::IgnoreReason;
use node_controller::{
    ActionQueue, ControlPointProducer, ControlTarget, DispatchOutcome, HoverTarget, NetNode,
    NetworkPrefab, NodeControllerTool, NodeFlags, NodePanel, RoadNetwork, ToolErrors, ToolInput,
    ToolOptions, ToolPhase,
};
use std::sync::Arc;

#[derive(Debug, Default)]
struct RecordingPanel {
    shown: Vec<u64>,
    closed: usize,
}

impl NodePanel for RecordingPanel {
    fn show_node(&mut self, node_id: u64) {
        self.shown.push(node_id);
    }

    fn close(&mut self) {
        self.closed += 1;
    }
}

type Tool = NodeControllerTool<RoadNetwork, RecordingPanel>;

struct Harness {
    net: RoadNetwork,
    queue: ActionQueue<RoadNetwork>,
    tool: Tool,
    producer: ControlPointProducer,
}

impl Harness {
    /// A(1) ── M(2) ── B(3) entlang X, M ist ein unterstützter Zwischenknoten.
    fn new() -> Self {
        let road = Arc::new(NetworkPrefab::new("Basic Road", 2.0, 30.0, 0.25));
        let mut net = RoadNetwork::new();
        net.add_node(NetNode::new(1, Vec3::ZERO, 0.0, NodeFlags::MOVEABLE));
        net.add_node(NetNode::new(
            2,
            Vec3::new(100.0, 0.0, 0.0),
            0.0,
            NodeFlags::MOVEABLE | NodeFlags::MIDDLE,
        ));
        net.add_node(NetNode::new(
            3,
            Vec3::new(200.0, 0.0, 0.0),
            0.0,
            NodeFlags::MOVEABLE,
        ));
        net.add_segment(1, 2, road.clone());
        net.add_segment(2, 3, road);

        let queue = ActionQueue::new();
        let (tool, producer) =
            Tool::create(ToolOptions::default(), queue.sender(), RecordingPanel::default());
        Self {
            net,
            queue,
            tool,
            producer,
        }
    }

    /// Ein Simulations-Tick mit anschließendem Frame-Beginn.
    fn tick(&mut self, hover: HoverTarget) {
        self.queue.run_pending(&mut self.net);
        self.producer.simulation_step(&hover, &self.net);
        self.tool.frame_update();
    }

    fn input(&mut self, input: ToolInput) -> Option<DispatchOutcome> {
        self.tool.handle_input(input, &self.net)
    }

    fn hover_middle_node(&mut self) {
        self.tick(HoverTarget::over(2, 1, Vec3::new(90.0, 0.0, 5.0)));
    }

    fn hover_left_segment(&mut self, x: f32) {
        self.tick(HoverTarget::over(1, 1, Vec3::new(x, 0.0, 20.0)));
    }
}

#[test]
fn test_tool_starts_inactive_and_ignores_everything() {
    let mut h = Harness::new();
    assert_eq!(h.tool.phase(), ToolPhase::Inactive);

    assert!(!h.producer.simulation_step(&HoverTarget::over(2, 1, Vec3::ZERO), &h.net));
    assert_eq!(h.tool.published_count(), 0);
    assert_eq!(
        h.input(ToolInput::PrimaryClick),
        Some(DispatchOutcome::Ignored(IgnoreReason::ToolInactive))
    );
    assert!(h.tool.build_overlay(&h.net).is_empty());
}

#[test]
fn test_primary_click_selects_supported_node() {
    let mut h = Harness::new();
    h.input(ToolInput::Enable);
    assert_eq!(h.tool.phase(), ToolPhase::ActiveIdle);

    h.hover_middle_node();
    assert_eq!(h.tool.cached_state().control_point.target, ControlTarget::Node(2));
    assert_eq!(h.tool.phase(), ToolPhase::ActiveHoveringValid);

    assert_eq!(h.input(ToolInput::PrimaryClick), Some(DispatchOutcome::Selected(2)));
    assert_eq!(h.tool.selection().selected_node, Some(2));
    assert_eq!(h.tool.panel().shown, vec![2]);
    assert_eq!(h.tool.phase(), ToolPhase::NodeSelected);
}

#[test]
fn test_click_with_errors_is_a_noop() {
    let mut h = Harness::new();
    h.input(ToolInput::Enable);

    // Erste Hälfte wäre 20 m lang, Mindestlänge ist 30 m
    h.hover_left_segment(20.0);
    assert_eq!(h.tool.cached_state().errors, ToolErrors::TOO_SHORT);
    assert_eq!(h.tool.phase(), ToolPhase::ActiveHoveringInvalid);

    assert_eq!(
        h.input(ToolInput::PrimaryClick),
        Some(DispatchOutcome::Ignored(IgnoreReason::Errors(ToolErrors::TOO_SHORT)))
    );
    assert_eq!(h.queue.run_pending(&mut h.net), 0);
    assert!(!h.tool.selection().has_selection());
    assert_eq!(h.net.node_count(), 3);
}

#[test]
fn test_insertion_selects_new_node_after_execution() {
    let mut h = Harness::new();
    h.input(ToolInput::Enable);
    h.hover_left_segment(50.0);

    let outcome = h.input(ToolInput::PrimaryClick);
    assert!(matches!(outcome, Some(DispatchOutcome::InsertionQueued(_))));
    assert!(!h.tool.selection().has_selection());
    assert_eq!(h.net.node_count(), 3);

    // Nächster Tick führt die Aktion aus, der Frame danach übernimmt das Ergebnis
    h.hover_left_segment(50.0);
    assert_eq!(h.net.node_count(), 4);
    assert_eq!(h.net.segment_count(), 3);
    assert_eq!(h.tool.selection().selected_node, Some(4));
    assert_eq!(h.tool.panel().shown, vec![4]);
}

#[test]
fn test_failed_insertion_leaves_selection_unchanged() {
    let mut h = Harness::new();
    h.input(ToolInput::Enable);
    h.hover_middle_node();
    h.input(ToolInput::PrimaryClick);
    assert_eq!(h.tool.selection().selected_node, Some(2));

    h.hover_left_segment(50.0);
    assert!(matches!(
        h.input(ToolInput::PrimaryClick),
        Some(DispatchOutcome::InsertionQueued(_))
    ));

    // Segment verschwindet, bevor die Aktion ausgeführt wird
    h.net.remove_segment(1);
    h.queue.run_pending(&mut h.net);
    h.tool.frame_update();

    assert_eq!(h.tool.selection().selected_node, Some(2));
    assert_eq!(h.tool.panel().shown, vec![2]);
    assert_eq!(h.net.node_count(), 3);
}

#[test]
fn test_queued_insertion_selects_after_secondary_click() {
    let mut h = Harness::new();
    h.input(ToolInput::Enable);
    h.hover_left_segment(50.0);
    h.input(ToolInput::PrimaryClick);

    assert_eq!(h.input(ToolInput::SecondaryClick), Some(DispatchOutcome::Cleared));
    assert!(!h.tool.selection().has_selection());
    h.hover_left_segment(50.0);

    // Das bereits eingereichte Einfügen gilt weiterhin
    assert_eq!(h.net.node_count(), 4);
    assert_eq!(h.tool.selection().selected_node, Some(4));
    assert_eq!(h.tool.panel().shown, vec![4]);
}

#[test]
fn test_toggling_tool_discards_pending_insertion_result() {
    let mut h = Harness::new();
    h.input(ToolInput::Enable);
    h.hover_left_segment(50.0);
    h.input(ToolInput::PrimaryClick);

    h.input(ToolInput::Disable);
    h.input(ToolInput::Enable);
    h.hover_left_segment(50.0);

    // Die Welt wurde mutiert, die Selektion bleibt aber leer
    assert_eq!(h.net.node_count(), 4);
    assert!(!h.tool.selection().has_selection());
    assert!(h.tool.panel().shown.is_empty());
}

#[test]
fn test_secondary_click_always_clears_and_closes() {
    let mut h = Harness::new();
    h.input(ToolInput::Enable);
    let closed_after_enable = h.tool.panel().closed;

    assert_eq!(h.input(ToolInput::SecondaryClick), Some(DispatchOutcome::Cleared));
    assert_eq!(h.tool.panel().closed, closed_after_enable + 1);

    h.hover_middle_node();
    h.input(ToolInput::PrimaryClick);
    assert_eq!(h.input(ToolInput::SecondaryClick), Some(DispatchOutcome::Cleared));
    assert!(!h.tool.selection().has_selection());
    assert_eq!(h.tool.panel().closed, closed_after_enable + 2);
}

#[test]
fn test_disable_resets_state_and_channel() {
    let mut h = Harness::new();
    h.input(ToolInput::Enable);
    h.hover_middle_node();
    h.input(ToolInput::PrimaryClick);
    let closed_before = h.tool.panel().closed;

    h.input(ToolInput::Disable);

    assert_eq!(h.tool.phase(), ToolPhase::Inactive);
    assert!(!h.tool.selection().has_selection());
    assert_eq!(h.tool.panel().closed, closed_before + 1);
    assert!(h.tool.cached_state().control_point.is_none());

    // Nach erneutem Aktivieren startet das Werkzeug ohne Selektion
    h.input(ToolInput::Enable);
    h.tool.frame_update();
    assert_eq!(h.tool.phase(), ToolPhase::ActiveIdle);
}

#[test]
fn test_overlay_follows_cached_state() {
    let mut h = Harness::new();
    h.input(ToolInput::Enable);
    h.hover_left_segment(50.0);

    let scene = h.tool.build_overlay(&h.net);
    assert_eq!(scene.circles.len(), 2);
    assert_eq!(scene.circles[0].center, Vec3::new(50.0, 0.0, 0.0));
    assert_eq!(scene.circles[0].color, h.tool.options().color_valid);
    assert_eq!(scene.circles[1].center, Vec3::new(50.0, 0.0, 20.0));
}
