//! Kaksha navigation demo - drives the office robot in simulation.
//!
//! Loads (or builds) a floor plan, wires the mock chassis, drive
//! strategy and simulated range sensor together, and either navigates
//! to a single target or fast-forwards the daily patrol route.

use clap::Parser;
use kaksha_io::chassis::MockChassis;
use kaksha_io::motion::{DiffDrive, DiffDriveConfig, Drive};
use kaksha_io::range::{GridRangeSensor, GridSensorConfig, RangeSensor};
use kaksha_map::{FloorPlan, io as map_io, office};
use kaksha_nav::{NavConfig, Navigator, default_patrol};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

#[derive(Parser, Debug)]
#[command(name = "kaksha-nav", about = "Office robot navigation simulator")]
struct Args {
    /// Floor plan JSON file (defaults to the built-in office)
    #[arg(long)]
    map: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Navigate to a single named location and exit
    #[arg(long)]
    target: Option<String>,

    /// Run the daily patrol route in fast-forward
    #[arg(long)]
    patrol: bool,

    /// Simulation tick in seconds
    #[arg(long, default_value_t = 0.1)]
    dt: f32,
}

fn main() -> kaksha_nav::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => NavConfig::load(path)?,
        None => NavConfig::default(),
    };

    let plan = match &args.map {
        Some(path) => {
            log::info!("loading floor plan from {}", path.display());
            map_io::load_json(path)?
        }
        None => {
            log::info!("using the built-in office floor plan");
            office::default_office()
        }
    };
    println!("{}", plan.to_ascii());

    let start = plan
        .location("dock")
        .map(|loc| loc.position.to_world())
        .unwrap_or(kaksha_map::WorldPoint::ZERO);

    let shared_plan = Arc::new(RwLock::new(plan));

    let chassis = MockChassis::new(start.x, start.y, 0.0);
    let mut drive = DiffDrive::new(
        chassis,
        DiffDriveConfig {
            linear_vel: config.drive.linear_vel,
            angular_vel: config.drive.angular_vel,
            ..Default::default()
        },
    );

    let mut sensor = GridRangeSensor::new(
        Arc::clone(&shared_plan),
        GridSensorConfig {
            max_range_m: config.sensor.max_range_m,
            safe_distance_m: config.sensor.safe_distance_m,
            step_cells: config.sensor.step_cells,
            ..Default::default()
        },
    );
    sensor.on_obstacle(Box::new(|distances| {
        let closest = distances.iter().copied().fold(f32::INFINITY, f32::min);
        log::warn!("obstacle within safety distance: closest reading {closest:.2}m");
    }));

    let mut navigator = Navigator::new(config.navigator.clone());

    if let Some(target) = &args.target {
        run_to_target(&shared_plan, &mut navigator, &mut drive, &mut sensor, target, args.dt)?;
    } else if args.patrol {
        run_patrol(&shared_plan, &mut navigator, &mut drive, &mut sensor, args.dt)?;
    } else {
        log::info!("nothing to do - pass --target <name> or --patrol");
    }

    Ok(())
}

fn run_to_target(
    shared_plan: &Arc<RwLock<FloorPlan>>,
    navigator: &mut Navigator,
    drive: &mut dyn Drive,
    sensor: &mut dyn RangeSensor,
    target: &str,
    dt: f32,
) -> kaksha_nav::Result<()> {
    {
        let plan = read_plan(shared_plan);
        navigator.navigate_to(&plan, target, drive)?;
    }

    let mut elapsed = 0.0f32;
    while navigator.is_navigating() {
        let plan = read_plan(shared_plan);
        navigator.update(&plan, dt, drive, Some(&mut *sensor));
        elapsed += dt;
        if elapsed > 600.0 {
            log::error!("navigation to {target:?} timed out");
            break;
        }
    }

    let pose = drive.pose();
    log::info!(
        "finished at ({:.2}, {:.2}) after {elapsed:.1}s simulated",
        pose.x,
        pose.y
    );
    Ok(())
}

fn run_patrol(
    shared_plan: &Arc<RwLock<FloorPlan>>,
    navigator: &mut Navigator,
    drive: &mut dyn Drive,
    sensor: &mut dyn RangeSensor,
    dt: f32,
) -> kaksha_nav::Result<()> {
    navigator.set_patrol_schedule(default_patrol());

    // One simulated minute per outer step, with inner ticks so active
    // navigations complete between triggers.
    for minute in 0..24 * 60 {
        let now = minute as f32;
        let plan = read_plan(shared_plan);
        if let Some(entry) = navigator.check_patrol(&plan, now, drive) {
            log::info!("[{:02}:{:02}] {}", minute / 60, minute % 60, entry.action);
        }
        let mut elapsed = 0.0f32;
        while navigator.is_navigating() && elapsed < 120.0 {
            navigator.update(&plan, dt, drive, Some(&mut *sensor));
            elapsed += dt;
        }
    }

    log::info!("patrol day complete");
    Ok(())
}

fn read_plan(shared_plan: &Arc<RwLock<FloorPlan>>) -> std::sync::RwLockReadGuard<'_, FloorPlan> {
    // Single-threaded loop: the lock cannot be poisoned here.
    shared_plan.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}
