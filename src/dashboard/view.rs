//! Dashboard View
//!
//! The set of render targets a refresh paints into, and an in-memory
//! implementation.

use serde::Serialize;

use super::snapshot::{DashboardSnapshot, Summary};
use crate::chart::{draw_bar_chart, draw_donut_chart, Canvas, RecordingCanvas};
use crate::render::{
    render_activity, render_inventory, render_shopping_list, render_usage, FeedBuffer, FeedTarget,
    TableBuffer, TableTarget,
};

/// Every surface the dashboard renders onto
pub trait DashboardView: Send {
    /// Update the metric cards
    fn show_summary(&mut self, summary: &Summary);

    fn inventory_table(&mut self) -> &mut dyn TableTarget;
    fn shopping_table(&mut self) -> &mut dyn TableTarget;
    fn activity_feed(&mut self) -> &mut dyn FeedTarget;
    fn usage_feed(&mut self) -> &mut dyn FeedTarget;

    /// Canvas for the stock distribution bar chart
    fn distribution_chart(&mut self) -> &mut dyn Canvas;

    /// Canvas for the stock health donut
    fn health_chart(&mut self) -> &mut dyn Canvas;
}

/// Paint a snapshot onto every target, in a fixed order
pub fn render_snapshot(view: &mut dyn DashboardView, snapshot: &DashboardSnapshot) {
    view.show_summary(&snapshot.summary());
    render_inventory(view.inventory_table(), &snapshot.items);
    render_activity(view.activity_feed(), &snapshot.movements);
    render_usage(view.usage_feed(), &snapshot.recent_usage);
    draw_bar_chart(
        view.distribution_chart(),
        &snapshot.distribution_series(),
        &DashboardSnapshot::distribution_style(),
    );
    draw_donut_chart(view.health_chart(), &snapshot.health_segments());
    render_shopping_list(view.shopping_table(), &snapshot.shopping);
}

/// A [`DashboardView`] backed by buffers and recording canvases
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryView {
    pub summary: Summary,
    pub inventory: TableBuffer,
    pub shopping: TableBuffer,
    pub activity: FeedBuffer,
    pub usage: FeedBuffer,
    pub distribution: RecordingCanvas,
    pub health: RecordingCanvas,
}

impl MemoryView {
    /// Empty view with both charts sized `chart_width` x `chart_height`
    pub fn new(chart_width: f64, chart_height: f64) -> Self {
        Self {
            summary: Summary::default(),
            inventory: TableBuffer::default(),
            shopping: TableBuffer::default(),
            activity: FeedBuffer::default(),
            usage: FeedBuffer::default(),
            distribution: RecordingCanvas::new(chart_width, chart_height),
            health: RecordingCanvas::new(chart_width, chart_height),
        }
    }
}

impl DashboardView for MemoryView {
    fn show_summary(&mut self, summary: &Summary) {
        self.summary = summary.clone();
    }

    fn inventory_table(&mut self) -> &mut dyn TableTarget {
        &mut self.inventory
    }

    fn shopping_table(&mut self) -> &mut dyn TableTarget {
        &mut self.shopping
    }

    fn activity_feed(&mut self) -> &mut dyn FeedTarget {
        &mut self.activity
    }

    fn usage_feed(&mut self) -> &mut dyn FeedTarget {
        &mut self.usage
    }

    fn distribution_chart(&mut self) -> &mut dyn Canvas {
        &mut self.distribution
    }

    fn health_chart(&mut self) -> &mut dyn Canvas {
        &mut self.health
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::DONUT_CAPTION;
    use crate::dashboard::snapshot::fixtures::*;

    #[test]
    fn test_render_snapshot_fills_every_target() {
        let snapshot = DashboardSnapshot::from_responses(dashboard_response(), shopping_response());
        let mut view = MemoryView::new(600.0, 300.0);

        render_snapshot(&mut view, &snapshot);

        assert_eq!(view.summary.total_units, 12);
        assert_eq!(view.inventory.rows.len(), 3);
        assert_eq!(view.shopping.rows.len(), 1);
        assert_eq!(view.activity.entries.len(), 1);
        assert!(view.usage.entries.is_empty());
        assert_eq!(view.distribution.fill_count(), 3);
        assert_eq!(view.health.texts(), vec![DONUT_CAPTION]);
    }

    #[test]
    fn test_rendering_twice_is_stable() {
        let snapshot = DashboardSnapshot::from_responses(dashboard_response(), shopping_response());
        let mut view = MemoryView::new(600.0, 300.0);

        render_snapshot(&mut view, &snapshot);
        let first = view.clone();
        render_snapshot(&mut view, &snapshot);

        assert_eq!(view, first);
    }
}
