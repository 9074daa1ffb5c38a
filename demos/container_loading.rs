use flat_loadcheck::{Boundary, Circle, LoadPlan, Rectangle};

// Euro-pallets are 1.2 x 0.8, paper rolls all share one radius
const RADIUS: f64 = 0.5;

fn main() {
    // semi-trailer floor, in metres
    let plan = LoadPlan::new(Boundary::new(13.6, 2.45))
        .with_rectangle(Rectangle::new("P1", [1.0, 0.6], 1.2, 0.8))
        .with_rectangle(Rectangle::new("P2", [1.5, 0.6], 1.2, 0.8))
        .with_rectangle(Rectangle::new("P3", [13.2, 0.6], 1.2, 0.8))
        .with_rectangle(Rectangle::new("P4", [3.0, 1.8], 1.2, 0.8))
        .with_rectangle(Rectangle::new("P5", [6.0, 0.6], 1.2, 0.8))
        .with_rectangle(Rectangle::new("P6", [9.0, 1.8], 1.2, 0.8))
        .with_circle(Circle::new("R1", [4.0, 0.6], RADIUS))
        .with_circle(Circle::new("R2", [4.3, 0.6], RADIUS))
        .with_circle(Circle::new("R3", [8.0, 1.5], RADIUS))
        .with_circle(Circle::new("R4", [14.0, 1.0], RADIUS));

    let report = match plan.report() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("invalid load list: {}", e);
            std::process::exit(2);
        }
    };

    for v in report.violations() {
        println!("{}", v);
    }

    let flagged = report.violation_set();
    for s in plan.shapes() {
        let status = if flagged.contains(s.id()) { "FAIL" } else { "ok" };
        println!("{:>4} {:<9} {}", s.id(), s.kind(), status);
    }

    if report.is_valid() {
        println!("load plan is valid");
    } else {
        println!("{} of {} items need moving", flagged.len(), plan.len());
        std::process::exit(1);
    }
}
