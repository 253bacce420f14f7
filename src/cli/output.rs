//! Output formatting utilities

use crate::application::{SaveOutcome, StatisticsReport, TripPlanner};
use crate::domain::itinerary::find_destination;
use crate::domain::{BudgetCategory, BudgetStatus, Destination, Itinerary};
use chrono::NaiveDate;

/// Format an amount in whole đồng with dot thousand separators, e.g. `1.234.567đ`
pub fn format_vnd(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}đ", grouped)
    } else {
        format!("{}đ", grouped)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}h", hours)
    } else {
        format!("{:.1}h", hours)
    }
}

fn status_marker(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::Normal => "",
        BudgetStatus::Elevated => "  [cao]",
        BudgetStatus::Critical => "  [rất cao]",
    }
}

/// Format a destination list for display
pub fn format_destination_list(destinations: &[Destination]) -> String {
    if destinations.is_empty() {
        return "No destinations found".to_string();
    }

    let mut output = String::new();
    for dest in destinations {
        output.push_str(&format!(
            "{}  {} ({}, {})  ★{:.1}  {}  {}\n",
            dest.id,
            dest.name,
            dest.location,
            dest.kind.label(),
            dest.average_rating,
            format_hours(dest.visit_duration),
            format_vnd(dest.base_cost())
        ));
    }
    output
}

pub fn format_destination(dest: &Destination) -> String {
    let mut output = format!("{} ({})\n", dest.name, dest.id);
    output.push_str(&format!("Địa điểm: {}\n", dest.location));
    output.push_str(&format!("Loại: {}\n", dest.kind.label()));
    if !dest.description.is_empty() {
        output.push_str(&format!("{}\n", dest.description));
    }
    output.push_str(&format!("Thời gian tham quan: {}\n", format_hours(dest.visit_duration)));
    output.push_str(&format!("Đánh giá: {:.1}/5\n", dest.average_rating));
    output.push_str(&format!("Ăn uống: {}\n", format_vnd(dest.food_cost)));
    output.push_str(&format!("Lưu trú: {}\n", format_vnd(dest.accommodation_cost)));
    output.push_str(&format!("Di chuyển: {}\n", format_vnd(dest.transportation_cost)));
    output
}

pub fn format_trip_list(itineraries: &[Itinerary]) -> String {
    if itineraries.is_empty() {
        return "No trips found".to_string();
    }

    let mut output = String::new();
    for trip in itineraries {
        output.push_str(&format!(
            "{}  {}  {} - {}  {} stop(s)\n",
            trip.id,
            trip.name,
            format_date(trip.start_date),
            format_date(trip.end_date),
            trip.destinations.len()
        ));
    }
    output
}

/// Day-by-day view of the planner's trip, with hours used per day
pub fn format_trip(planner: &TripPlanner) -> String {
    let mut output = String::new();
    let days = match planner.details() {
        Some(details) => {
            output.push_str(&format!(
                "{}  {} - {}\n",
                details.name,
                format_date(details.start_date),
                format_date(details.end_date)
            ));
            details.day_count()
        }
        None => planner.plan().days().last().copied().unwrap_or(0),
    };

    let plan = planner.plan();
    for day in 1..=days {
        let hours = plan.day_hours(day, planner.destinations());
        output.push_str(&format!("\nNgày {} ({} / 24h)\n", day, format_hours(hours)));

        let items = plan.day_items(day);
        if items.is_empty() {
            output.push_str("  (trống)\n");
        }
        for item in items {
            match find_destination(planner.destinations(), &item.destination_id) {
                Some(dest) => output.push_str(&format!(
                    "  {}. {} ({})  {}\n",
                    item.order,
                    dest.name,
                    dest.location,
                    format_hours(dest.visit_duration)
                )),
                None => output.push_str(&format!(
                    "  {}. {} (không còn tồn tại)\n",
                    item.order, item.destination_id
                )),
            }
        }
    }
    output
}

/// Budget table: one line per category, then total, limit and the highest category
pub fn format_budget(planner: &TripPlanner) -> String {
    let budget = planner.budget();
    let summary = planner.summary();

    let mut output = String::new();
    for category in BudgetCategory::ALL {
        output.push_str(&format!(
            "{:<14}{:>16}  {:>3}%{}\n",
            category.label(),
            format_vnd(budget.get(category)),
            budget.share_percent(category),
            status_marker(planner.status(category))
        ));
    }
    output.push_str(&format!("{:<14}{:>16}\n", "Tổng", format_vnd(summary.total)));

    if summary.limit > 0.0 {
        output.push_str(&format!(
            "{:<14}{:>16}  {:>3}%\n",
            "Ngân sách",
            format_vnd(summary.limit),
            summary.limit_usage_percent
        ));
        if summary.over_budget {
            output.push_str(&format!("Vượt ngân sách {}\n", format_vnd(summary.overspend)));
        }
    }
    if let Some((category, amount)) = summary.highest {
        output.push_str(&format!(
            "Chi nhiều nhất: {} ({})\n",
            category.label(),
            format_vnd(amount)
        ));
    }
    output
}

pub fn format_save_outcome(outcome: &SaveOutcome) -> String {
    match outcome {
        SaveOutcome::Complete {
            itinerary_id,
            budget_id,
        } => format!("Saved trip {} (budget {})", itinerary_id, budget_id),
        SaveOutcome::BudgetPending {
            itinerary_id,
            reason,
        } => format!(
            "Saved trip {}, but its budget was not saved: {}\n\
            Run 'dulich trip budget {}' to retry",
            itinerary_id, reason, itinerary_id
        ),
    }
}

pub fn format_stats(report: &StatisticsReport) -> String {
    let stats = &report.destinations;
    let mut output = String::new();

    output.push_str("Điểm đến theo loại\n");
    if stats.type_counts.is_empty() {
        output.push_str("  No destinations found\n");
    }
    for (kind, count) in &stats.type_counts {
        output.push_str(&format!("  {:<12}{}\n", kind.label(), count));
    }

    if !stats.top_rated.is_empty() {
        output.push_str(&format!(
            "\nĐánh giá trung bình: {:.1}\nChi phí trung bình\n",
            stats.average_rating
        ));
        for (category, amount) in stats.average_costs.entries() {
            output.push_str(&format!("  {:<14}{:>14}\n", category.label(), format_vnd(amount)));
        }

        output.push_str("\nĐánh giá cao nhất\n");
        for (rank, dest) in stats.top_rated.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} ★{:.1}\n",
                rank + 1,
                dest.name,
                dest.average_rating
            ));
        }
    }

    output.push_str(&format!("\nChuyến đi năm {}\n", report.year));
    for month in report.months.iter().filter(|m| m.trips > 0) {
        output.push_str(&format!(
            "  Tháng {:>2}: {} chuyến, {}\n",
            month.month,
            month.trips,
            format_vnd(month.revenue)
        ));
    }
    output.push_str(&format!(
        "  Tổng: {} chuyến, {}\n",
        report.total_trips(),
        format_vnd(report.total_revenue())
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::TripDetails;
    use crate::domain::destination::fixtures::destination;

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_vnd(0.0), "0đ");
        assert_eq!(format_vnd(999.0), "999đ");
        assert_eq!(format_vnd(1000.0), "1.000đ");
        assert_eq!(format_vnd(1234567.4), "1.234.567đ");
        assert_eq!(format_vnd(52.5), "53đ");
        assert_eq!(format_vnd(-15000.0), "-15.000đ");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(format_date(date), "07/01/2025");
    }

    #[test]
    fn test_format_empty_lists() {
        assert_eq!(format_destination_list(&[]), "No destinations found");
        assert_eq!(format_trip_list(&[]), "No trips found");
    }

    #[test]
    fn test_format_destination_list() {
        let dest = destination("7", 2.5, 100000.0, 200000.0, 50000.0);
        let output = format_destination_list(&[dest]);
        assert!(output.contains("7  Điểm 7"));
        assert!(output.contains("2.5h"));
        assert!(output.contains("350.000đ"));
    }

    fn planner() -> TripPlanner {
        let mut planner = TripPlanner::new();
        let ticket = planner.begin_fetch();
        planner.apply_destinations(
            ticket,
            vec![
                destination("A", 5.0, 100.0, 50.0, 50.0),
                destination("B", 3.0, 200.0, 100.0, 100.0),
            ],
        );
        planner
            .set_details(TripDetails {
                name: "Đà Nẵng".to_string(),
                start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            })
            .unwrap();
        planner.append_destination("A", 1).unwrap();
        planner.append_destination("B", 1).unwrap();
        planner
    }

    #[test]
    fn test_format_trip() {
        let output = format_trip(&planner());
        assert!(output.contains("Đà Nẵng  01/06/2025 - 02/06/2025"));
        assert!(output.contains("Ngày 1 (9h / 24h)"));
        assert!(output.contains("  1. Điểm A"));
        assert!(output.contains("  2. Điểm B"));
        assert!(output.contains("Ngày 2 (0h / 24h)\n  (trống)"));
    }

    #[test]
    fn test_format_budget() {
        let mut planner = planner();
        planner.set_budget_limit(500.0).unwrap();
        let output = format_budget(&planner);

        assert!(output.contains("ăn uống"));
        assert!(output.contains("690đ"));
        assert!(output.contains("Vượt ngân sách 190đ"));
        assert!(output.contains("Chi nhiều nhất: ăn uống (300đ)"));
        // 300 of a 500 limit is 60%
        assert!(output.lines().next().unwrap_or_default().contains("[rất cao]"));
    }

    #[test]
    fn test_format_save_outcome() {
        let pending = SaveOutcome::BudgetPending {
            itinerary_id: "4".to_string(),
            reason: "timeout".to_string(),
        };
        let output = format_save_outcome(&pending);
        assert!(output.contains("budget was not saved: timeout"));
        assert!(output.contains("dulich trip budget 4"));
    }
}
