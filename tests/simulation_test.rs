//! End-to-end runs of the whole simulation with every real component.

use std::time::Duration;

use brigade::config::{Scenario, SimSettings};
use brigade::coordinator::Summary;
use brigade::domain::{Action, Role, Transition};
use brigade::runtime::RestaurantSystem;

/// Fast ticks and short meals; paused tokio time makes the runs instant
/// either way.
fn settings() -> SimSettings {
    SimSettings { tick_period: Duration::from_millis(20), eating_ticks: 2..=4 }
}

async fn run_and_collect(scenario: Scenario) -> (Summary, Vec<Transition>) {
    let mut system = RestaurantSystem::new(scenario, settings());
    let mut transcript = system.take_events().expect("events taken once");
    let summary = system.run().await;

    // The system dropped the sending side, so this drains and terminates.
    let mut events = Vec::new();
    while let Some(event) = transcript.recv().await {
        events.push(event);
    }
    (summary, events)
}

#[tokio::test(start_paused = true)]
async fn contended_table_forces_serial_service() {
    let scenario = Scenario::parse(
        "NC=1 NW=1 NT=1\n\
         Soup=00:02\n\
         CustomerID=1 ArrivalTime=09:00 Order=Soup\n\
         CustomerID=2 ArrivalTime=09:00 Order=Soup\n",
    )
    .expect("scenario parses");

    let (summary, events) = run_and_collect(scenario).await;
    assert_eq!(summary.served, 2);

    let seatings: Vec<&Transition> = events
        .iter()
        .filter(|e| e.role == Role::Customer && matches!(e.action, Action::Seated { .. }))
        .collect();
    assert_eq!(seatings.len(), 2);
    // There is only one table, so both seatings name it.
    for seating in &seatings {
        assert!(matches!(seating.action, Action::Seated { table: 1 }));
    }

    let (first, second) = (seatings[0], seatings[1]);
    assert_ne!(first.id, second.id);
    let first_left = events
        .iter()
        .find(|e| e.id == first.id && matches!(e.action, Action::Left { .. }))
        .expect("first customer leaves");
    // The second diner's wait covers the first diner's entire visit.
    assert!(
        second.tick >= first_left.tick,
        "second seated at tick {} before the first left at tick {}",
        second.tick,
        first_left.tick
    );
}

#[tokio::test(start_paused = true)]
async fn every_customer_walks_the_full_lifecycle() {
    let scenario = Scenario::parse(
        "NC=2 NW=2 NT=3\n\
         Burger=00:15 Salad=00:05 Soup=00:08\n\
         CustomerID=1 ArrivalTime=12:00 Order=Burger\n\
         CustomerID=2 ArrivalTime=12:01 Order=Salad\n\
         CustomerID=3 ArrivalTime=12:03 Order=Soup\n\
         CustomerID=4 ArrivalTime=12:10 Order=Salad\n",
    )
    .expect("scenario parses");
    let arrivals = [(1u32, 12 * 60), (2, 12 * 60 + 1), (3, 12 * 60 + 3), (4, 12 * 60 + 10)];

    let (summary, events) = run_and_collect(scenario).await;

    assert_eq!(summary.served, 4);
    assert!(summary.avg_prep_ticks > 0.0);
    assert!(summary.elapsed_ticks > 0);

    let tick_of = |pred: &dyn Fn(&&Transition) -> bool| {
        events.iter().find(pred).map(|e| e.tick).expect("event present")
    };

    for (customer, arrival) in arrivals {
        let arrived = tick_of(&|e| e.id == customer && e.action == Action::Arrived);
        let seated = tick_of(&|e| {
            e.id == customer && e.role == Role::Customer && matches!(e.action, Action::Seated { .. })
        });
        let ordered =
            tick_of(&|e| e.id == customer && matches!(e.action, Action::OrderPlaced { .. }));
        let served = tick_of(&|e| {
            e.role == Role::Waiter
                && matches!(&e.action, Action::MealServed { customer: c, .. } if *c == customer)
        });
        let left = tick_of(&|e| e.id == customer && matches!(e.action, Action::Left { .. }));

        assert!(arrived >= arrival, "customer {customer} arrived before its roster time");
        assert!(seated >= arrived);
        assert!(ordered >= seated);
        assert!(served >= ordered);
        assert!(left >= served);
    }

    // One preparation per order, started and finished.
    let starts = events.iter().filter(|e| matches!(e.action, Action::PrepStarted { .. })).count();
    let finishes =
        events.iter().filter(|e| matches!(e.action, Action::PrepFinished { .. })).count();
    assert_eq!(starts, 4);
    assert_eq!(finishes, 4);
}

#[tokio::test(start_paused = true)]
async fn empty_roster_completes_immediately() {
    let scenario =
        Scenario::parse("NC=1 NW=1 NT=1\nSoup=00:08\n").expect("scenario parses");
    let summary = RestaurantSystem::new(scenario, settings()).run().await;
    assert_eq!(summary.served, 0);
    assert_eq!(summary.elapsed_ticks, 0);
}
