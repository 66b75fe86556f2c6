/// gtool terminal demo
///
/// Loads a mesh (or builds a cube), draws its wireframe framed by two
/// borders, and reports which sample points fall strictly inside the inner border.
///
/// Usage: gtool-terminal [mesh.obj]
use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    style::Print,
    terminal::{self, Clear, ClearType},
    QueueableCommand,
};
use gtool_core::{Border, CornerRadii, Mesh, Rgb, RotationState, Transform};
use gtool_terminal::{init_logging, LoggingConfig, TermCanvas};
use log::info;
use std::io::{stdout, Write};

fn load_mesh() -> Result<Mesh> {
    let mut mesh = Mesh::new();
    match std::env::args().nth(1) {
        Some(path) => {
            mesh.load_object_file(&path)
                .with_context(|| format!("failed to load mesh from {path}"))?;
        }
        None => mesh += Mesh::cube(2.0),
    }
    Ok(mesh)
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mesh = load_mesh()?;
    info!("mesh has {} triangles", mesh.len());
    if let Some(first) = mesh.triangles().first() {
        info!(
            "first triangle: normal {:?}, middle {:?}",
            first.normal().get_tuple(),
            first.middle().get_tuple()
        );
    }

    let (columns, rows) = terminal::size().unwrap_or((80, 24));
    let width = u32::from(columns).clamp(20, 120);
    let height = u32::from(rows).saturating_sub(3).clamp(10, 60);
    let (w, h) = (i32::try_from(width)?, i32::try_from(height)?);

    let short = w.min(h) - 1;

    let outer = Border::new([0, 0], [w - 1, h - 1], "grey-75%", short / 4, 1)?;
    let inner = Border::new(
        [w / 6, h / 6],
        [w - 1 - w / 6, h - 1 - h / 6],
        "cyan",
        CornerRadii::new(-(short / 8), short / 8, short / 8, -(short / 8)),
        1,
    )?;

    let model = Transform::rotation_matrix(&RotationState::new(0.5, 0.6, 0.0));
    let view = Transform::translation_matrix(0.0, 0.0, 5.0);
    let projection = Transform::projection_matrix(width, height, 90.0, 0.1, 100.0)?;
    let mvp = Transform::mvp_matrix(&model, &view, &projection);

    let mut canvas = TermCanvas::new(width, height);
    outer.draw(&mut canvas);
    inner.draw(&mut canvas);
    canvas.draw_mesh(&mesh, &mvp, Rgb::named("yellow")?);

    let mut out = stdout();
    out.queue(Clear(ClearType::All))?;
    canvas.blit(&mut out, (0, 0))?;

    let points = [
        [f64::from(w / 2), f64::from(h / 2)],
        [f64::from(w / 6), f64::from(h / 6)],
        [f64::from(w / 6 + 1), f64::from(h / 2)],
        [-1.0, f64::from(h / 2)],
    ];
    let hits = inner.are_in(&points)?;
    out.queue(MoveTo(0, u16::try_from(height)?))?;
    for (point, hit) in points.iter().zip(&hits) {
        out.queue(Print(format!("({:.0}, {:.0}) inside: {hit}  ", point[0], point[1])))?;
    }
    out.queue(Print("\n"))?;
    out.flush()?;

    Ok(())
}
