//! SVG path data shared by shape outlines and edge routes.
//!
//! [`PathData`] is a small declarative command list. It can be rendered to an
//! SVG `d` attribute with [`PathData::to_svg_data`] and inspected for its
//! first and last points, which the edge engine relies on for continuity.
//!
//! Coordinates are written with Rust's shortest round-trip float formatting,
//! so parsing the emitted string yields exactly the stored `f32` values.

use std::fmt::Write;

use crate::geometry::{Bounds, Point, Size};

/// A single SVG path command in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo {
        control: Point,
        to: Point,
    },
    CubicTo {
        control1: Point,
        control2: Point,
        to: Point,
    },
    ArcTo {
        radii: Size,
        x_rotation: f32,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

impl PathCommand {
    /// The point the pen rests on after this command, if it moves the pen
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) => Some(p),
            Self::QuadTo { to, .. } | Self::CubicTo { to, .. } | Self::ArcTo { to, .. } => Some(to),
            Self::Close => None,
        }
    }

    /// Returns this command moved by `offset`
    pub fn translate(&self, offset: Point) -> Self {
        let t = |p: Point| p.add_point(offset);
        match *self {
            Self::MoveTo(p) => Self::MoveTo(t(p)),
            Self::LineTo(p) => Self::LineTo(t(p)),
            Self::QuadTo { control, to } => Self::QuadTo {
                control: t(control),
                to: t(to),
            },
            Self::CubicTo {
                control1,
                control2,
                to,
            } => Self::CubicTo {
                control1: t(control1),
                control2: t(control2),
                to: t(to),
            },
            Self::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                to,
            } => Self::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                to: t(to),
            },
            Self::Close => Self::Close,
        }
    }
}

/// An ordered list of [`PathCommand`]s built with a fluent API.
///
/// # Examples
///
/// ```
/// # use sketchflow_core::{geometry::Point, path::PathData};
/// let data = PathData::new()
///     .move_to(Point::new(0.0, 0.0))
///     .line_to(Point::new(10.0, 0.0))
///     .line_to(Point::new(10.0, 5.5));
///
/// assert_eq!(data.to_svg_data(), "M0,0 L10,0 L10,5.5");
/// assert_eq!(data.end_point(), Some(Point::new(10.0, 5.5)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, point: Point) -> Self {
        self.commands.push(PathCommand::MoveTo(point));
        self
    }

    pub fn line_to(mut self, point: Point) -> Self {
        self.commands.push(PathCommand::LineTo(point));
        self
    }

    pub fn quad_to(mut self, control: Point, to: Point) -> Self {
        self.commands.push(PathCommand::QuadTo { control, to });
        self
    }

    pub fn cubic_to(mut self, control1: Point, control2: Point, to: Point) -> Self {
        self.commands.push(PathCommand::CubicTo {
            control1,
            control2,
            to,
        });
        self
    }

    pub fn arc_to(mut self, radii: Size, large_arc: bool, sweep: bool, to: Point) -> Self {
        self.commands.push(PathCommand::ArcTo {
            radii,
            x_rotation: 0.0,
            large_arc,
            sweep,
            to,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Appends a single command in place
    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// Returns the recorded commands
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The first point of the path, which is the target of its leading move
    pub fn start_point(&self) -> Option<Point> {
        self.commands.first().and_then(PathCommand::end_point)
    }

    /// The last point the pen visits.
    ///
    /// A trailing close returns the pen to the start of its subpath.
    pub fn end_point(&self) -> Option<Point> {
        let mut subpath_start = None;
        let mut current = None;
        for command in &self.commands {
            match command {
                PathCommand::MoveTo(p) => {
                    subpath_start = Some(*p);
                    current = Some(*p);
                }
                PathCommand::Close => current = subpath_start,
                other => current = other.end_point(),
            }
        }
        current
    }

    /// Every point mentioned by the path, control points included.
    ///
    /// Arc bulges are not sampled, so callers needing tight bounds for
    /// arcs must account for the radii themselves.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().flat_map(|command| {
            let points: Vec<Point> = match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![p],
                PathCommand::QuadTo { control, to } => vec![control, to],
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                } => vec![control1, control2, to],
                PathCommand::ArcTo { to, .. } => vec![to],
                PathCommand::Close => Vec::new(),
            };
            points
        })
    }

    /// Bounding box of [`points`](Self::points), or `None` for an empty path
    pub fn control_bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points())
    }

    /// Returns a copy of this path moved by `offset`
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            commands: self
                .commands
                .iter()
                .map(|command| command.translate(offset))
                .collect(),
        }
    }

    /// Renders the commands to an SVG `d` attribute value
    pub fn to_svg_data(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            // Writing into a String cannot fail
            let _ = match *command {
                PathCommand::MoveTo(p) => write!(out, "M{},{}", p.x(), p.y()),
                PathCommand::LineTo(p) => write!(out, "L{},{}", p.x(), p.y()),
                PathCommand::QuadTo { control, to } => write!(
                    out,
                    "Q{},{} {},{}",
                    control.x(),
                    control.y(),
                    to.x(),
                    to.y()
                ),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                } => write!(
                    out,
                    "C{},{} {},{} {},{}",
                    control1.x(),
                    control1.y(),
                    control2.x(),
                    control2.y(),
                    to.x(),
                    to.y()
                ),
                PathCommand::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    out,
                    "A{},{} {} {} {} {},{}",
                    radii.width(),
                    radii.height(),
                    x_rotation,
                    u8::from(large_arc),
                    u8::from(sweep),
                    to.x(),
                    to.y()
                ),
                PathCommand::Close => write!(out, "Z"),
            };
        }
        out
    }
}

impl From<Vec<PathCommand>> for PathData {
    fn from(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }
}
