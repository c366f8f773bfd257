use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance.
    pub fn distance(&self, other: &Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn left(&self) -> Point {
        *self + Vector::new(-1, 0)
    }

    pub fn right(&self) -> Point {
        *self + Vector::new(1, 0)
    }

    pub fn up(&self) -> Point {
        *self + Vector::new(0, 1)
    }

    pub fn down(&self) -> Point {
        *self + Vector::new(0, -1)
    }

    pub fn neighbors(&self) -> [Point; 4] {
        [self.left(), self.right(), self.down(), self.up()]
    }

    /// Candidate destinations for one turn, in search order: stay, left, up, right, down.
    pub fn moves(&self) -> [Point; 5] {
        [*self, self.left(), self.up(), self.right(), self.down()]
    }

    pub fn is_adjacent(&self, other: &Point) -> bool {
        self.distance(other) == 1
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, vector: Vector) -> Point {
        Point::new(self.x + vector.x, self.y + vector.y)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, vector: Vector) -> Point {
        Point::new(self.x - vector.x, self.y - vector.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn between(start: Point, end: Point) -> Self {
        Self::new(end.x - start.x, end.y - start.y)
    }

    /// Manhattan norm.
    pub fn length(&self) -> i32 {
        self.x.abs() + self.y.abs()
    }

    /// Unit step along each axis, zero where the component is zero.
    pub fn signum(&self) -> Vector {
        Vector::new(self.x.signum(), self.y.signum())
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }
}
