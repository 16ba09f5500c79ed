//! Activity and usage feeds

use super::{FeedEntry, FeedTarget};
use crate::api::{ActivityEntry, UsageEntry};
use crate::format::{format_change, format_currency, format_datetime};

/// Render stock movements, newest first as served
pub fn render_activity(target: &mut dyn FeedTarget, entries: &[ActivityEntry]) {
    target.clear();

    for entry in entries {
        target.push_entry(FeedEntry {
            title: entry.name.clone(),
            detail: entry.reason.clone(),
            meta: format!(
                "{} • Change: {}",
                format_datetime(&entry.created_at),
                format_change(entry.change_amount)
            ),
        });
    }
}

/// Render recorded usage events
pub fn render_usage(target: &mut dyn FeedTarget, entries: &[UsageEntry]) {
    target.clear();

    for entry in entries {
        target.push_entry(FeedEntry {
            title: entry.client_name.clone(),
            detail: entry.details.clone(),
            meta: format!(
                "{} • Total {}",
                format_datetime(&entry.created_at),
                format_currency(entry.total_cost)
            ),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FeedBuffer;
    use rust_decimal_macros::dec;

    #[test]
    fn test_activity_meta() {
        let mut feed = FeedBuffer::default();
        render_activity(
            &mut feed,
            &[
                ActivityEntry {
                    name: "Shampoo".to_string(),
                    reason: "Restock".to_string(),
                    change_amount: 12,
                    created_at: "2026-10-15T14:00:00".to_string(),
                },
                ActivityEntry {
                    name: "Gel".to_string(),
                    reason: "Usage: Salon".to_string(),
                    change_amount: -2,
                    created_at: "2026-10-14T08:05:00".to_string(),
                },
            ],
        );

        assert_eq!(feed.entries.len(), 2);
        assert_eq!(feed.entries[0].title, "Shampoo");
        assert_eq!(feed.entries[0].meta, "Oct 15, 2026, 2:00 PM • Change: +12");
        assert_eq!(feed.entries[1].meta, "Oct 14, 2026, 8:05 AM • Change: -2");
    }

    #[test]
    fn test_usage_meta() {
        let mut feed = FeedBuffer::default();
        render_usage(
            &mut feed,
            &[UsageEntry {
                client_name: "Salon".to_string(),
                details: "Shampoo x4".to_string(),
                total_cost: dec!(10),
                created_at: "2026-10-15T14:00:00".to_string(),
            }],
        );

        assert_eq!(feed.entries[0].detail, "Shampoo x4");
        assert_eq!(feed.entries[0].meta, "Oct 15, 2026, 2:00 PM • Total $10.00");

        render_usage(&mut feed, &[]);
        assert!(feed.entries.is_empty());
    }
}
