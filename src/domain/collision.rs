#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CollisionBox {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CollisionBox {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> usize {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> usize {
        self.y.saturating_add(self.height)
    }

    /// Whether the x extents touch or overlap. Edges that meet count as overlapping.
    pub fn overlaps_horizontally(&self, other: &Self) -> bool {
        self.right() >= other.x && self.x <= other.right()
    }

    pub fn overlaps_vertically(&self, other: &Self) -> bool {
        self.bottom() >= other.y && self.y <= other.bottom()
    }

    /// Reports a collision when the boxes overlap on either axis.
    ///
    /// This is an OR of the two axis tests, not a rectangle intersection: boxes that
    /// share only a column band or only a row band collide.
    pub fn collides(&self, other: &Self) -> bool {
        self.overlaps_horizontally(other) || self.overlaps_vertically(other)
    }
}

pub fn generate_box(x: usize, y: usize, width: usize, height: usize) -> CollisionBox {
    CollisionBox::new(x, y, width, height)
}

pub fn check_horizontal_collision(first: &CollisionBox, second: &CollisionBox) -> bool {
    first.overlaps_horizontally(second)
}

pub fn check_vertical_collision(first: &CollisionBox, second: &CollisionBox) -> bool {
    first.overlaps_vertically(second)
}

pub fn check_collision(first: &CollisionBox, second: &CollisionBox) -> bool {
    first.collides(second)
}

#[cfg(test)]
mod tests {
    use super::{
        CollisionBox, check_collision, check_horizontal_collision, check_vertical_collision,
        generate_box,
    };

    #[test]
    fn generate_box_stores_fields() {
        assert_eq!(
            generate_box(1, 2, 3, 4),
            CollisionBox {
                x: 1,
                y: 2,
                width: 3,
                height: 4
            }
        );
    }

    #[test]
    fn overlapping_on_both_axes_collides() {
        let first = generate_box(0, 0, 10, 10);
        let second = generate_box(5, 5, 10, 10);

        assert!(check_collision(&first, &second));
        assert!(check_collision(&second, &first));
    }

    #[test]
    fn disjoint_on_both_axes_does_not_collide() {
        let first = generate_box(0, 0, 10, 10);
        let second = generate_box(20, 20, 5, 5);

        assert!(!check_horizontal_collision(&first, &second));
        assert!(!check_vertical_collision(&first, &second));
        assert!(!check_collision(&first, &second));
    }

    #[test]
    fn overlap_on_one_axis_is_enough() {
        // Same row band, far apart horizontally.
        let first = generate_box(0, 0, 10, 10);
        let second = generate_box(100, 5, 10, 10);

        assert!(!check_horizontal_collision(&first, &second));
        assert!(check_vertical_collision(&first, &second));
        assert!(check_collision(&first, &second));

        // Same column band, far apart vertically.
        let third = generate_box(5, 100, 10, 10);
        assert!(check_collision(&first, &third));
    }

    #[test]
    fn touching_edges_overlap() {
        let first = generate_box(0, 0, 10, 10);
        let second = generate_box(10, 50, 5, 5);

        assert!(check_horizontal_collision(&first, &second));
    }
}
