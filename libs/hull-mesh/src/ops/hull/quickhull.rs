//! # QuickHull Algorithm
//!
//! 3D convex hull computation using the QuickHull algorithm.
//! Based on the original algorithm by Barber, Dobkin, and Huhdanpaa.
//!
//! ## Algorithm Steps
//!
//! 1. Find 6 extreme points (min/max on each axis)
//! 2. Build initial tetrahedron from 4 non-coplanar points
//! 3. Assign remaining points to the face they lie farthest above
//! 4. For each face with outside points:
//!    a. Find farthest point (the eye)
//!    b. Flood-fill the faces visible from the eye across shared edges
//!    c. Order the horizon edges into one closed loop
//!    d. Create new faces from horizon to eye
//!    e. Reassign orphaned outside points
//! 5. Repeat until no faces have outside points
//!
//! Faces are kept counter-clockwise when viewed from outside, so every
//! directed edge is owned by exactly one face and the neighbour across
//! `(a, b)` is the owner of `(b, a)`.

use crate::error::HullError;
use crate::mesh::HullMesh;
use config::constants::{HullConfig, MIN_HULL_POINTS};
use glam::DVec3;
use log::{debug, trace};
use std::collections::{HashMap, HashSet};

/// An indexed convex hull over a borrowed point cloud.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use hull_mesh::ConvexHull;
///
/// let points = [
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
/// ];
/// let hull = ConvexHull::compute(&points)?;
/// assert_eq!(hull.face_count(), 4);
/// # Ok::<(), hull_mesh::HullError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConvexHull<'a> {
    points: &'a [DVec3],
    faces: Vec<HullFace>,
    tolerance: f64,
}

impl<'a> ConvexHull<'a> {
    /// Computes the hull with the default configuration.
    pub fn compute(points: &'a [DVec3]) -> Result<Self, HullError> {
        Self::compute_with(points, &HullConfig::default())
    }

    /// Computes the hull of `points`.
    ///
    /// # Errors
    ///
    /// * [`HullError::DegenerateInput`] when fewer than 4 points are given,
    ///   a coordinate is not finite, or the cloud does not span 3D.
    /// * [`HullError::NumericalInstability`] when horizon stitching breaks.
    pub fn compute_with(points: &'a [DVec3], config: &HullConfig) -> Result<Self, HullError> {
        if points.len() < MIN_HULL_POINTS {
            return Err(HullError::degenerate(format!(
                "Convex hull requires at least {MIN_HULL_POINTS} points, got {}",
                points.len()
            )));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(HullError::degenerate(format!(
                "Point {index} has a non-finite coordinate"
            )));
        }

        let tolerance = config.tolerance_for(bounding_extent(points));
        let mut builder = HullBuilder::new(points, tolerance)?;
        builder.run()?;

        let faces: Vec<HullFace> = builder.faces.into_iter().filter(|f| f.alive).collect();
        debug!(
            "convex hull: {} points, {} faces, {} points discarded, {} horizon repairs, tolerance {:e}",
            points.len(),
            faces.len(),
            builder.discarded,
            builder.repairs,
            tolerance
        );

        Ok(Self {
            points,
            faces,
            tolerance,
        })
    }

    /// Returns the input points the hull indexes into.
    #[inline]
    pub fn points(&self) -> &'a [DVec3] {
        self.points
    }

    /// Returns the number of hull faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the absolute tolerance used during construction.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the faces as index triples, CCW when viewed from outside.
    pub fn faces(&self) -> Vec<[usize; 3]> {
        self.faces.iter().map(|f| f.vertices).collect()
    }

    /// Returns the outward unit normal of each face.
    pub fn normals(&self) -> Vec<DVec3> {
        self.faces.iter().map(|f| f.normal).collect()
    }

    /// Returns the sorted indices of input points that are hull vertices.
    pub fn vertex_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .faces
            .iter()
            .flat_map(|f| f.vertices)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Flattens the hull into a flat-shaded, non-indexed triangle list.
    pub fn to_mesh(&self) -> HullMesh {
        let mut mesh = HullMesh::with_capacity(self.faces.len());
        for face in &self.faces {
            let [a, b, c] = face.vertices;
            mesh.add_face([self.points[a], self.points[b], self.points[c]], face.normal);
        }
        mesh
    }
}

// =============================================================================
// FACE STRUCTURE
// =============================================================================

/// A face of the convex hull (triangle).
#[derive(Debug, Clone)]
struct HullFace {
    /// Indices of the three vertices (CCW from outside)
    vertices: [usize; 3],
    /// Outward-pointing unit normal
    normal: DVec3,
    /// Distance from origin along normal
    distance: f64,
    /// Points outside this face (indices into points array)
    outside_points: Vec<usize>,
    /// Zero-area face; rejected before it can join the hull
    degenerate: bool,
    alive: bool,
}

impl HullFace {
    /// Creates a new face from three vertex indices.
    fn new(v0: usize, v1: usize, v2: usize, points: &[DVec3], tolerance: f64) -> Self {
        let p0 = points[v0];
        let cross = (points[v1] - p0).cross(points[v2] - p0);
        let degenerate = cross.length() <= tolerance * tolerance;
        let normal = if degenerate {
            DVec3::ZERO
        } else {
            cross.normalize()
        };

        Self {
            vertices: [v0, v1, v2],
            normal,
            distance: normal.dot(p0),
            outside_points: Vec::new(),
            degenerate,
            alive: true,
        }
    }

    /// Returns the signed distance from a point to this face's plane.
    #[inline]
    fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }

    fn center(&self, points: &[DVec3]) -> DVec3 {
        let [a, b, c] = self.vertices;
        (points[a] + points[b] + points[c]) / 3.0
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    /// Finds the farthest outside point.
    fn farthest_point(&self, points: &[DVec3]) -> Option<usize> {
        self.outside_points
            .iter()
            .copied()
            .max_by(|&a, &b| {
                self.signed_distance(points[a])
                    .total_cmp(&self.signed_distance(points[b]))
            })
    }
}

// =============================================================================
// BUILDER
// =============================================================================

struct HullBuilder<'a> {
    points: &'a [DVec3],
    faces: Vec<HullFace>,
    /// Directed edge -> owning face
    edge_owner: HashMap<(usize, usize), usize>,
    /// Centroid of the seed tetrahedron, strictly inside every later hull
    interior: DVec3,
    tolerance: f64,
    discarded: usize,
    /// Faces pulled into a visible region to mend its horizon
    repairs: usize,
    /// Former hull vertices already given one more chance as outside points
    retested: HashSet<usize>,
}

impl<'a> HullBuilder<'a> {
    /// Seeds the hull with the initial tetrahedron and distributes the
    /// remaining points into outside sets.
    fn new(points: &'a [DVec3], tolerance: f64) -> Result<Self, HullError> {
        let [p0, p1, p2, p3] = initial_simplex(points, tolerance)?;
        let interior = (points[p0] + points[p1] + points[p2] + points[p3]) / 4.0;

        let mut builder = Self {
            points,
            faces: Vec::new(),
            edge_owner: HashMap::new(),
            interior,
            tolerance,
            discarded: 0,
            repairs: 0,
            retested: HashSet::new(),
        };

        for [a, b, c] in [[p0, p1, p2], [p0, p2, p3], [p0, p3, p1], [p1, p3, p2]] {
            let face = builder.oriented_face(a, b, c);
            builder.push_face(face)?;
        }

        let seed: HashSet<usize> = [p0, p1, p2, p3].into_iter().collect();
        let candidates: Vec<usize> = (0..builder.faces.len()).collect();
        for idx in (0..points.len()).filter(|i| !seed.contains(i)) {
            if !builder.assign_point(idx, &candidates) {
                builder.discarded += 1;
            }
        }

        Ok(builder)
    }

    /// Creates a face with outward-pointing normal, flipping the winding if
    /// the normal faces the interior point.
    fn oriented_face(&self, v0: usize, v1: usize, v2: usize) -> HullFace {
        let face = HullFace::new(v0, v1, v2, self.points, self.tolerance);
        let to_interior = self.interior - face.center(self.points);
        if face.normal.dot(to_interior) > 0.0 {
            HullFace::new(v0, v2, v1, self.points, self.tolerance)
        } else {
            face
        }
    }

    fn push_face(&mut self, face: HullFace) -> Result<usize, HullError> {
        let idx = self.faces.len();
        for edge in face.edges() {
            if let Some(owner) = self.edge_owner.insert(edge, idx) {
                return Err(HullError::instability(format!(
                    "directed edge {edge:?} already owned by face {owner}"
                )));
            }
        }
        self.faces.push(face);
        Ok(idx)
    }

    fn neighbor(&self, (a, b): (usize, usize)) -> Result<usize, HullError> {
        self.edge_owner
            .get(&(b, a))
            .copied()
            .ok_or_else(|| HullError::instability(format!("edge ({a}, {b}) has no twin")))
    }

    /// Puts a point into the outside set of the candidate face it lies
    /// farthest above. Returns false when it lies above none of them.
    fn assign_point(&mut self, point_idx: usize, candidates: &[usize]) -> bool {
        let point = self.points[point_idx];
        let mut best = None;
        let mut best_dist = self.tolerance;

        for &face_idx in candidates {
            let face = &self.faces[face_idx];
            if !face.alive {
                continue;
            }
            let dist = face.signed_distance(point);
            if dist > best_dist {
                best_dist = dist;
                best = Some(face_idx);
            }
        }

        match best {
            Some(face_idx) => {
                self.faces[face_idx].outside_points.push(point_idx);
                true
            }
            None => false,
        }
    }

    /// Main QuickHull iteration.
    fn run(&mut self) -> Result<(), HullError> {
        while let Some(face_idx) = self
            .faces
            .iter()
            .position(|f| f.alive && !f.outside_points.is_empty())
        {
            self.add_eye(face_idx)?;
        }
        Ok(())
    }

    /// Extends the hull to the farthest outside point of `face_idx`.
    fn add_eye(&mut self, face_idx: usize) -> Result<(), HullError> {
        let eye = self.faces[face_idx]
            .farthest_point(self.points)
            .ok_or_else(|| HullError::instability("face selected with empty outside set"))?;
        let eye_point = self.points[eye];

        let mut visible = self.visible_faces(face_idx, eye_point)?;
        let horizon = loop {
            let edges = self.horizon_edges(&visible)?;
            let offending = match order_horizon(&edges)? {
                Horizon::Loop(horizon) => match self.inward_cone_edge(&horizon, eye) {
                    Some(edge) => edge,
                    None => break horizon,
                },
                Horizon::Tangled(edge) => edge,
            };
            let behind = self.neighbor(offending)?;
            trace!("eye {eye}: absorbing face {behind} behind horizon edge {offending:?}");
            visible.push(behind);
            self.repairs += 1;
        };
        trace!(
            "eye {eye}: {} visible faces, {} horizon edges",
            visible.len(),
            horizon.len()
        );

        // Retire the visible region. Vertices off the horizon lose every
        // incident face; each is re-tested with the outside points once.
        let rim: HashSet<usize> = horizon.iter().map(|&(a, _)| a).collect();
        let mut buried = HashSet::new();
        let mut orphans = Vec::new();
        for &idx in &visible {
            let face = &mut self.faces[idx];
            face.alive = false;
            orphans.extend(face.outside_points.drain(..).filter(|&p| p != eye));
            for vertex in face.vertices {
                if !rim.contains(&vertex) && buried.insert(vertex) {
                    if self.retested.insert(vertex) {
                        orphans.push(vertex);
                    } else {
                        self.discarded += 1;
                    }
                }
            }
            for edge in face.edges() {
                self.edge_owner.remove(&edge);
            }
        }

        // Cone from the horizon to the eye; every face is outward after repair
        let mut new_faces = Vec::with_capacity(horizon.len());
        for (a, b) in horizon {
            let face = HullFace::new(a, b, eye, self.points, self.tolerance);
            new_faces.push(self.push_face(face)?);
        }

        // New faces first; the rest of the hull only for points they miss
        let mut older: Option<Vec<usize>> = None;
        let first_new = new_faces.first().copied().unwrap_or(self.faces.len());
        for point_idx in orphans {
            if self.assign_point(point_idx, &new_faces) {
                continue;
            }
            let older = older.get_or_insert_with(|| {
                (0..first_new).filter(|&i| self.faces[i].alive).collect()
            });
            if !self.assign_point(point_idx, older) {
                self.discarded += 1;
            }
        }

        Ok(())
    }

    /// True when the face has area and its normal points away from the
    /// interior point.
    fn is_outward(&self, face: &HullFace) -> bool {
        let to_face = face.center(self.points) - self.interior;
        !face.degenerate && face.normal.dot(to_face) > 0.0
    }

    /// First horizon edge whose cone face towards `eye` would be flipped
    /// or flat.
    fn inward_cone_edge(&self, horizon: &[(usize, usize)], eye: usize) -> Option<(usize, usize)> {
        horizon.iter().copied().find(|&(a, b)| {
            let face = HullFace::new(a, b, eye, self.points, self.tolerance);
            !self.is_outward(&face)
        })
    }

    /// Flood-fills the faces visible from `eye` starting at `start`.
    ///
    /// Returned in discovery order so construction is deterministic.
    fn visible_faces(&self, start: usize, eye: DVec3) -> Result<Vec<usize>, HullError> {
        let mut visible = vec![start];
        let mut seen: HashSet<usize> = HashSet::from([start]);
        let mut to_visit = vec![start];

        while let Some(current) = to_visit.pop() {
            for edge in self.faces[current].edges() {
                let other = self.neighbor(edge)?;
                if seen.contains(&other) {
                    continue;
                }
                if self.faces[other].signed_distance(eye) > self.tolerance {
                    seen.insert(other);
                    visible.push(other);
                    to_visit.push(other);
                }
            }
        }

        Ok(visible)
    }

    /// Edges of visible faces whose twin belongs to a face that is not
    /// visible, in no particular order.
    fn horizon_edges(&self, visible: &[usize]) -> Result<Vec<(usize, usize)>, HullError> {
        let visible_set: HashSet<usize> = visible.iter().copied().collect();
        let mut edges = Vec::new();
        for &idx in visible {
            for edge in self.faces[idx].edges() {
                if !visible_set.contains(&self.neighbor(edge)?) {
                    edges.push(edge);
                }
            }
        }
        Ok(edges)
    }
}

// =============================================================================
// HORIZON
// =============================================================================

/// Horizon edges after an attempt to chain them.
#[derive(Debug, PartialEq)]
enum Horizon {
    /// One simple closed loop, in traversal order, each edge keeping the
    /// direction it has in its visible face.
    Loop(Vec<(usize, usize)>),
    /// An edge that keeps the horizon from being one simple loop.
    Tangled((usize, usize)),
}

/// Chains horizon edges into a single closed loop.
///
/// A vertex starting two edges, a walk that never returns to its start, or
/// edges left over once the first loop closes all yield
/// [`Horizon::Tangled`] with the edge to mend.
fn order_horizon(edges: &[(usize, usize)]) -> Result<Horizon, HullError> {
    let Some(&first) = edges.first().filter(|_| edges.len() >= 3) else {
        return Err(HullError::instability(format!(
            "horizon has only {} edges",
            edges.len()
        )));
    };

    let mut next: HashMap<usize, usize> = HashMap::with_capacity(edges.len());
    for &(a, b) in edges {
        if next.insert(a, b).is_some() {
            return Ok(Horizon::Tangled((a, b)));
        }
    }

    let start = first.0;
    let mut ordered = Vec::with_capacity(edges.len());
    let mut current = start;
    loop {
        let Some(&following) = next.get(&current) else {
            return Ok(Horizon::Tangled(ordered.last().copied().unwrap_or(first)));
        };
        ordered.push((current, following));
        if following == start {
            break;
        }
        if ordered.len() >= edges.len() {
            return Ok(Horizon::Tangled((current, following)));
        }
        current = following;
    }

    if ordered.len() != edges.len() {
        let reached: HashSet<(usize, usize)> = ordered.iter().copied().collect();
        if let Some(&stray) = edges.iter().find(|e| !reached.contains(e)) {
            return Ok(Horizon::Tangled(stray));
        }
    }

    Ok(Horizon::Loop(ordered))
}

// =============================================================================
// INITIAL SIMPLEX
// =============================================================================

/// Largest axis extent of the cloud's bounding box.
fn bounding_extent(points: &[DVec3]) -> f64 {
    let (min, max) = points.iter().fold(
        (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
        |(min, max), p| (min.min(*p), max.max(*p)),
    );
    (max - min).max_element()
}

/// Builds the initial tetrahedron from extreme points.
fn initial_simplex(points: &[DVec3], tolerance: f64) -> Result<[usize; 4], HullError> {
    // Find extreme points on each axis
    let mut extremes = [0usize; 6];
    for (i, p) in points.iter().enumerate() {
        for axis in 0..3 {
            if p[axis] < points[extremes[axis * 2]][axis] {
                extremes[axis * 2] = i;
            }
            if p[axis] > points[extremes[axis * 2 + 1]][axis] {
                extremes[axis * 2 + 1] = i;
            }
        }
    }

    let (p0, p1) = find_farthest_pair(&extremes, points);
    if points[p0].distance(points[p1]) <= tolerance {
        return Err(HullError::degenerate("All points are coincident"));
    }

    let p2 = find_farthest_from_line(p0, p1, points, tolerance)?;
    let p3 = find_farthest_from_plane(p0, p1, p2, points, tolerance)?;

    Ok([p0, p1, p2, p3])
}

/// Finds the pair of points with maximum distance.
fn find_farthest_pair(indices: &[usize], points: &[DVec3]) -> (usize, usize) {
    let mut max_dist = -1.0;
    let mut best = (indices[0], indices[1]);

    for (i, &a) in indices.iter().enumerate() {
        for &b in indices.iter().skip(i + 1) {
            let dist = (points[a] - points[b]).length_squared();
            if dist > max_dist {
                max_dist = dist;
                best = (a, b);
            }
        }
    }
    best
}

/// Finds the point farthest from a line.
fn find_farthest_from_line(
    p0: usize,
    p1: usize,
    points: &[DVec3],
    tolerance: f64,
) -> Result<usize, HullError> {
    let line_dir = (points[p1] - points[p0]).normalize();
    let mut max_dist = tolerance;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        let v = *p - points[p0];
        let dist = (v - v.dot(line_dir) * line_dir).length();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| HullError::degenerate("All points are collinear"))
}

/// Finds the point farthest from a plane.
fn find_farthest_from_plane(
    p0: usize,
    p1: usize,
    p2: usize,
    points: &[DVec3],
    tolerance: f64,
) -> Result<usize, HullError> {
    let normal = (points[p1] - points[p0])
        .cross(points[p2] - points[p0])
        .normalize();

    let mut max_dist = tolerance;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        let dist = normal.dot(*p - points[p0]).abs();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| HullError::degenerate("All points are coplanar"))
}
