use anyhow::{Context, Result};
use clap::Parser;
use glam::{Affine3A, Vec2, Vec3};

use registration_viewer::cli::{Cli, Mode};
use registration_viewer::demo::{self, RegistrationCase};
use registration_viewer::{
    IterationObserver, ObserverOptions, PlaneObserver, RenderSurface, RigidTransform2, SceneObserver,
};

fn run_plane<S: RenderSurface>(
    mut observer: PlaneObserver<'_, S>,
    cli: &Cli,
    case: &RegistrationCase<Vec2, RigidTransform2>,
) -> Result<()> {
    let frames = demo::run_registration(&mut observer, demo::rigid_steps_2d(case.truth, cli.iterations))
        .context("registration loop failed")?;
    log::info!(
        "{} iterations, final mean residual {:.5}",
        frames,
        demo::mean_residual_2d(observer.result(), &case.target)
    );
    observer.close()?;
    Ok(())
}

fn run_scene<S: RenderSurface>(
    mut observer: SceneObserver<'_, S>,
    cli: &Cli,
    case: &RegistrationCase<Vec3, Affine3A>,
) -> Result<()> {
    let frames = demo::run_registration(&mut observer, demo::rigid_steps_3d(case.truth, cli.iterations))
        .context("registration loop failed")?;
    log::info!(
        "{} iterations, final mean residual {:.5}",
        frames,
        demo::mean_residual_3d(observer.result(), &case.target)
    );
    observer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let options: ObserverOptions = cli.observer_options().context("invalid options")?;
    if options.save_frames {
        log::info!("saving frames to {}", options.frame_dir.display());
    }

    match cli.mode {
        Mode::Plane => {
            let case = demo::plane_case(cli.points);
            if cli.headless {
                run_plane(PlaneObserver::headless(&case.source, &case.target, &options)?, &cli, &case)
            } else {
                let observer = PlaneObserver::windowed(&case.source, &case.target, &options)
                    .context("could not open a window (try --headless)")?;
                run_plane(observer, &cli, &case)
            }
        }
        Mode::Scene => {
            let case = demo::scene_case(cli.points);
            if cli.headless {
                run_scene(SceneObserver::headless(&case.source, &case.target, &options)?, &cli, &case)
            } else {
                let observer = SceneObserver::windowed(&case.source, &case.target, &options)
                    .context("could not open a window (try --headless)")?;
                run_scene(observer, &cli, &case)
            }
        }
    }
}
