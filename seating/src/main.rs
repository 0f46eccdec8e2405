//! Seating demo binary
//!
//! Walks one booking session through select, summary and commit, printing the
//! aisle-partitioned chart along the way.

use cinema_seating::{
    BookingResult, BookingSession, RowSegment, SeatId, SeatStatus, SeatingEnvironment,
    SystemClock, VenueConfig, row_label,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_chart(session: &BookingSession) -> anyhow::Result<()> {
    println!("{:^60}", "SCREEN");
    for row in 0..session.seat_map().row_count() {
        let mut line = format!("{:>3} ", row_label(row));
        for segment in session.row_layout(row)? {
            match segment {
                RowSegment::Seats(seats) => {
                    for seat in seats {
                        let mark = match seat.status {
                            SeatStatus::Available => seat.color.name().chars().next().unwrap_or('.'),
                            SeatStatus::Selected => '*',
                            SeatStatus::Booked => 'x',
                        };
                        line.push(' ');
                        line.push(mark);
                    }
                }
                RowSegment::Gap => line.push_str("   "),
            }
        }
        println!("{line}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinema_seating=debug,seating_demo=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = VenueConfig::from_env()?;
    println!("=== {} ===", config.title);
    println!("{}\n", config.subtitle);

    let env = SeatingEnvironment::new(
        Arc::new(SystemClock),
        Arc::new(|result: &BookingResult| {
            tracing::info!(seats = ?result.seat_ids, total = %result.total_price, "Booking delivered");
        }),
    );

    let booked = [SeatId::from("A1"), SeatId::from("C4")];
    let mut session = BookingSession::new(config, &booked, env)?;

    for id in ["A2", "A3", "D6", "A1"] {
        let status = session.toggle(&SeatId::from(id));
        println!(">>> Click {id}: {status:?}");
    }

    println!();
    print_chart(&session)?;

    let summary = session.summary();
    println!("\nSeats: {}", summary.seat_list());
    println!("Count: {}", summary.count);
    println!("Total: {}", summary.total.with_currency(session.currency()));
    println!("[ {} ]", summary.action_label(session.currency()));

    let result = session.commit()?;
    println!(
        "\nBooking confirmed: {} for {}",
        result.seat_ids.len(),
        result.total_price.with_currency(session.currency())
    );

    println!();
    print_chart(&session)?;

    if let Err(error) = session.commit() {
        println!("\nSecond commit refused: {error}");
    }

    Ok(())
}
