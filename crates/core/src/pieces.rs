//! Pieces module - piece definitions, shape matrices and kick rotation
//!
//! Every piece is described by a square occupancy matrix (2x2, 3x3 or 4x4).
//! Rotation is a plain 90° matrix rotation followed by a short list of
//! horizontal kick offsets; there are no vertical kicks.

use crate::types::{PieceKind, RotateDir, Rgb, BOARD_WIDTH, SPAWN_Y};

/// Largest matrix side used by any piece.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a single mino relative to the matrix origin, as `(col, row)`.
pub type MinoOffset = (i8, i8);

/// Horizontal offsets tried after a clockwise rotation, in priority order.
pub const CW_KICKS: [i8; 5] = [0, -1, 1, -2, 2];

/// Horizontal offsets tried after a counter-clockwise rotation, in priority order.
pub const CCW_KICKS: [i8; 5] = [0, 1, -1, 2, -2];

/// Square boolean occupancy matrix.
///
/// Only the top-left `size x size` block is meaningful; the rest is always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from a 0/1 matrix. Entries outside `size` are ignored.
    pub const fn from_matrix(size: u8, matrix: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let n = size as usize;
        let mut r = 0;
        while r < n {
            let mut c = 0;
            while c < n {
                cells[r][c] = matrix[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self { size, cells }
    }

    /// Side length of the matrix.
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size as usize && col < self.size as usize && self.cells[row][col]
    }

    /// Occupied cells as `(col, row)` offsets, row-major.
    pub fn minos(&self) -> impl Iterator<Item = MinoOffset> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |r| {
            (0..n)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Number of occupied cells.
    pub fn mino_count(&self) -> usize {
        self.minos().count()
    }

    /// Rows of the matrix holding at least one cell (`first..=last`), if any.
    pub fn occupied_rows(&self) -> Option<(usize, usize)> {
        let n = self.size as usize;
        let mut rows = (0..n).filter(|&r| self.cells[r][..n].iter().any(|&c| c));
        let first = rows.next()?;
        let last = rows.last().unwrap_or(first);
        Some((first, last))
    }

    /// Rotate 90° clockwise: `result[i][j] = src[n-1-j][i]`.
    pub fn rotate_cw(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (i, row) in cells.iter_mut().enumerate().take(n) {
            for (j, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - j][i];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Rotate 90° counter-clockwise: `result[i][j] = src[j][n-1-i]`.
    pub fn rotate_ccw(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (i, row) in cells.iter_mut().enumerate().take(n) {
            for (j, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[j][n - 1 - i];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    pub fn rotated(&self, dir: RotateDir) -> Self {
        match dir {
            RotateDir::Cw => self.rotate_cw(),
            RotateDir::Ccw => self.rotate_ccw(),
        }
    }
}

/// Immutable description of a piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDefinition {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Rgb,
    /// What the piece stands for in the context window.
    pub name: &'static str,
    pub icon: &'static str,
}

/// Definitions indexed by [`PieceKind::index`].
pub const PIECE_DEFINITIONS: [PieceDefinition; 7] = [
    PieceDefinition {
        kind: PieceKind::I,
        shape: Shape::from_matrix(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
        color: Rgb::from_hex(0x06b6d4),
        name: "Long Doc",
        icon: "📄",
    },
    PieceDefinition {
        kind: PieceKind::O,
        shape: Shape::from_matrix(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        color: Rgb::from_hex(0xeab308),
        name: "Data Block",
        icon: "📦",
    },
    PieceDefinition {
        kind: PieceKind::T,
        shape: Shape::from_matrix(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        color: Rgb::from_hex(0xa855f7),
        name: "API Call",
        icon: "🔌",
    },
    PieceDefinition {
        kind: PieceKind::S,
        shape: Shape::from_matrix(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        color: Rgb::from_hex(0x22c55e),
        name: "Chat Msg",
        icon: "💬",
    },
    PieceDefinition {
        kind: PieceKind::Z,
        shape: Shape::from_matrix(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        color: Rgb::from_hex(0xef4444),
        name: "Error Log",
        icon: "⚠️",
    },
    PieceDefinition {
        kind: PieceKind::J,
        shape: Shape::from_matrix(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        color: Rgb::from_hex(0x3b82f6),
        name: "Code Block",
        icon: "{ }",
    },
    PieceDefinition {
        kind: PieceKind::L,
        shape: Shape::from_matrix(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        color: Rgb::from_hex(0xf97316),
        name: "Config",
        icon: "⚙️",
    },
];

/// Look up the definition of a piece kind.
pub fn definition(kind: PieceKind) -> &'static PieceDefinition {
    &PIECE_DEFINITIONS[kind.index()]
}

/// Spawn shape (unrotated) of a piece kind.
pub fn get_shape(kind: PieceKind) -> Shape {
    definition(kind).shape
}

/// Column at which a shape enters the board: centered, rounded left.
pub fn spawn_x(shape: &Shape) -> i8 {
    ((BOARD_WIDTH - shape.size()) / 2) as i8
}

/// The falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Unrotated piece at its spawn-centered position.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_x(&shape),
            y: SPAWN_Y,
        }
    }

    pub fn color(&self) -> Rgb {
        definition(self.kind).color
    }

    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Absolute `(x, y)` board coordinates of each occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .minos()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Try to rotate a piece with horizontal kicks.
///
/// `collides(shape, x, y)` reports whether a shape would collide at a position.
/// Returns the rotated piece and the kick that was applied, or `None` when every
/// offset collides.
pub fn try_rotate(
    piece: &ActivePiece,
    dir: RotateDir,
    collides: impl Fn(&Shape, i8, i8) -> bool,
) -> Option<(ActivePiece, i8)> {
    let rotated = piece.shape.rotated(dir);
    let kicks = match dir {
        RotateDir::Cw => &CW_KICKS,
        RotateDir::Ccw => &CCW_KICKS,
    };

    kicks.iter().find_map(|&kick| {
        let x = piece.x + kick;
        if collides(&rotated, x, piece.y) {
            None
        } else {
            Some((
                ActivePiece {
                    shape: rotated,
                    x,
                    ..*piece
                },
                kick,
            ))
        }
    })
}
