//! Baut die Overlay-Szene aus gecachtem Zustand, Selektion und Welt.

use super::state::{PublishedState, SelectionState};
use crate::core::{ControlTarget, NodeFlags, WorldQuery};
use crate::shared::{CircleStyle, OverlayScene, ToolOptions};

/// Erzeugt die Overlay-Szene eines Frames.
///
/// Arbeitet ausschließlich auf dem gecachten Zustand des Frames; nur die
/// Einfüge-Prüfung für Segment-Ziele wird gegen die Welt erneut ausgewertet.
pub fn build_overlay<W: WorldQuery + ?Sized>(
    cached: &PublishedState,
    selection: &SelectionState,
    world: &W,
    options: &ToolOptions,
) -> OverlayScene {
    let mut scene = OverlayScene::default();

    if let Some(node) = selection.selected_node.and_then(|id| world.node(id)) {
        scene.push(
            node.position,
            options.node_circle_radius,
            options.color_selected,
            CircleStyle::Outline,
        );
        for segment_id in world.incident_segments(node.id) {
            let neighbor = world
                .segment(segment_id)
                .and_then(|segment| world.node(segment.other_node(node.id)?));
            if let Some(neighbor) = neighbor.filter(|n| n.flags.contains(NodeFlags::MIDDLE)) {
                scene.push(
                    neighbor.position,
                    options.node_circle_radius,
                    options.color_middle,
                    CircleStyle::Filled,
                );
            }
        }
    }

    let Some(prefab) = cached.prefab.as_deref() else {
        return scene;
    };
    if !cached.is_hover_valid() {
        return scene;
    }

    let cp = &cached.control_point;
    match cp.target {
        ControlTarget::Node(node_id) => {
            if let Some(node) = world.node(node_id) {
                let color = if world.is_node_supported(node_id) {
                    options.color_valid
                } else {
                    options.color_invalid
                };
                scene.push(
                    node.position,
                    options.node_circle_radius,
                    color,
                    CircleStyle::Outline,
                );
            }
        }
        ControlTarget::Segment(_) => {
            let errors = cached.errors | world.check_insertion(prefab, cp);
            let color = if errors.is_none() {
                options.color_valid
            } else {
                options.color_invalid
            };
            scene.push(cp.position, prefab.half_width, color, CircleStyle::Outline);
        }
        ControlTarget::None => {}
    }

    scene.push(
        cached.hit_position,
        options.hit_marker_radius,
        options.color_hit,
        CircleStyle::Filled,
    );
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ControlPoint, NetNode, NetworkPrefab, RoadNetwork, ToolErrors};
    use glam::Vec3;
    use std::sync::Arc;

    fn road() -> Arc<NetworkPrefab> {
        Arc::new(NetworkPrefab::new("Basic Road", 3.0, 2.0, 0.25))
    }

    /// A(1) ── M(2, MIDDLE) ── B(3)
    fn network() -> RoadNetwork {
        let mut net = RoadNetwork::new();
        net.add_node(NetNode::new(1, Vec3::ZERO, 0.0, NodeFlags::MOVEABLE));
        net.add_node(NetNode::new(
            2,
            Vec3::new(50.0, 0.0, 0.0),
            0.0,
            NodeFlags::MOVEABLE | NodeFlags::MIDDLE,
        ));
        net.add_node(NetNode::new(
            3,
            Vec3::new(100.0, 0.0, 0.0),
            0.0,
            NodeFlags::MOVEABLE,
        ));
        net.add_segment(1, 2, road());
        net.add_segment(2, 3, road());
        net
    }

    #[test]
    fn nothing_without_prefab_or_selection() {
        let net = network();
        let scene = build_overlay(
            &PublishedState::default(),
            &SelectionState::new(),
            &net,
            &ToolOptions::default(),
        );
        assert!(scene.is_empty());
    }

    #[test]
    fn selected_node_marks_middle_neighbours() {
        let net = network();
        let options = ToolOptions::default();
        let selection = SelectionState {
            selected_node: Some(1),
        };

        let scene = build_overlay(&PublishedState::default(), &selection, &net, &options);

        assert_eq!(scene.circles.len(), 2);
        assert_eq!(scene.circles[0].color, options.color_selected);
        assert_eq!(scene.circles[0].style, CircleStyle::Outline);
        assert_eq!(scene.circles[1].center, Vec3::new(50.0, 0.0, 0.0));
        assert_eq!(scene.circles[1].color, options.color_middle);
        assert_eq!(scene.circles[1].style, CircleStyle::Filled);
    }

    #[test]
    fn segment_target_uses_half_width_and_error_color() {
        let net = network();
        let options = ToolOptions::default();
        let hit = Vec3::new(25.0, 0.0, 1.0);
        let mut cached = PublishedState {
            control_point: ControlPoint::on_segment(1, Vec3::new(25.0, 0.0, 0.0), 0.0),
            errors: ToolErrors::empty(),
            prefab: Some(road()),
            hit_position: hit,
        };

        let scene = build_overlay(&cached, &SelectionState::new(), &net, &options);
        assert_eq!(scene.circles.len(), 2);
        assert_eq!(scene.circles[0].radius, 3.0);
        assert_eq!(scene.circles[0].color, options.color_valid);
        assert_eq!(scene.circles[1].center, hit);
        assert_eq!(scene.circles[1].color, options.color_hit);

        cached.errors = ToolErrors::TOO_SHORT;
        let scene = build_overlay(&cached, &SelectionState::new(), &net, &options);
        assert_eq!(scene.circles[0].color, options.color_invalid);
    }

    #[test]
    fn node_target_colored_by_support() {
        let net = network();
        let options = ToolOptions::default();
        let mut cached = PublishedState {
            control_point: ControlPoint::on_node(2),
            errors: ToolErrors::empty(),
            prefab: Some(road()),
            hit_position: Vec3::new(50.0, 0.0, 0.0),
        };

        let scene = build_overlay(&cached, &SelectionState::new(), &net, &options);
        assert_eq!(scene.circles[0].color, options.color_valid);

        cached.control_point = ControlPoint::on_node(3);
        let scene = build_overlay(&cached, &SelectionState::new(), &net, &options);
        assert_eq!(scene.circles[0].color, options.color_invalid);
    }

    #[test]
    fn invalid_hover_draws_no_marker() {
        let net = network();
        let cached = PublishedState {
            errors: ToolErrors::RAYCAST_FAILED,
            prefab: Some(road()),
            ..PublishedState::default()
        };

        let scene = build_overlay(&cached, &SelectionState::new(), &net, &ToolOptions::default());
        assert!(scene.is_empty());
    }
}
