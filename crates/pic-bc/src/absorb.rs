//! First-order absorbing face update shared by Silver-Müller and Buneman.

use pic_core::Side;
use pic_fields::{Field, FieldValue, GridLayout, face_indices, pair_mut};

/// Coefficients of an absorbing update on one face.
#[derive(Clone, Debug, PartialEq)]
pub struct AbsorbingCoefficients {
    /// Weight of the tangential electric field on the face.
    pub alpha: f64,
    /// Weight of the next-inner magnetic layer.
    pub beta: f64,
    /// Weight of the transverse derivative of the normal magnetic field,
    /// per transverse axis. Zero along the normal axis.
    pub delta: [f64; 3],
}

impl AbsorbingCoefficients {
    /// Silver-Müller coefficients for faces normal to `normal`.
    pub fn silver_muller(layout: &GridLayout, normal: usize) -> Self {
        let lambda = layout.dt_over_dx(normal);
        let cb = 1.0 / (1.0 + lambda);
        let mut delta = [0.0; 3];
        for (t, d) in delta.iter_mut().enumerate() {
            if t != normal && layout.is_present(t) {
                *d = layout.dt_over_dx(t) * cb;
            }
        }
        if layout.geometry.is_cylindrical() {
            // azimuthal derivative is i*m/r, the 1/r lives in the per-mode term
            delta[2] = layout.timestep * cb;
        }
        Self {
            alpha: 2.0 * cb,
            beta: (lambda - 1.0) * cb,
            delta,
        }
    }
}

/// Indices along the normal axis used by a face update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FaceRows {
    /// Outermost dual layer, the one being written.
    pub ghost: usize,
    /// Dual layer next to it.
    pub inner: usize,
    /// Primal layer holding the tangential E on the face.
    pub face: usize,
}

impl FaceRows {
    pub fn new(layout: &GridLayout, normal: usize, side: Side) -> Self {
        match side {
            Side::Min => Self {
                ghost: 0,
                inner: 1,
                face: 0,
            },
            Side::Max => {
                let nd = layout.n_dual(normal);
                Self {
                    ghost: nd - 1,
                    inner: nd - 2,
                    face: layout.n_primal(normal) - 1,
                }
            }
        }
    }
}

/// Update the two tangential magnetic components on the outermost dual layer.
///
/// With `s` the inward sign of the face and `(t1, t2)` the tangential axes
/// following `normal` cyclically:
///
/// ```text
/// B_t1 =  s*alpha*E_t2 + beta*B_t1(inner) - s*delta_t2 * d(B_n)/d(t2)
/// B_t2 = -s*alpha*E_t1 + beta*B_t2(inner) + s*delta_t1 * d(B_n)/d(t1)
/// ```
///
/// Derivatives along present axes are one-cell differences of `B_n`; along
/// an absent axis with a non-zero `delta` the `azimuthal` hook supplies the
/// derivative from the target index and the local `B_n`.
pub(crate) fn absorb_face<T: FieldValue>(
    layout: &GridLayout,
    e: &[Field<T>; 3],
    b: &mut [Field<T>; 3],
    normal: usize,
    side: Side,
    coeffs: &AbsorbingCoefficients,
    azimuthal: &dyn Fn([usize; 3], T) -> T,
) {
    let s = side.inward_sign();
    let rows = FaceRows::new(layout, normal, side);
    let t1 = (normal + 1) % 3;
    let t2 = (normal + 2) % 3;

    // (target B component, source E component, derivative axis, E sign, derivative sign)
    let updates = [(t1, t2, t2, s, -s), (t2, t1, t1, -s, s)];

    for (target, source, along, e_sign, d_sign) in updates {
        let (bt, bn) = pair_mut(b, target, normal);
        let es = &e[source];
        let dims = bt.dims();
        for idx in face_indices(dims, normal, rows.ghost) {
            let mut at_face = idx;
            at_face[normal] = rows.face;
            let mut at_inner = idx;
            at_inner[normal] = rows.inner;

            let derivative = if layout.is_present(along) {
                let k = idx[along];
                if k >= 1 && k < bn.dims()[along] {
                    let mut prev = at_face;
                    prev[along] = k - 1;
                    bn.get(at_face) - bn.get(prev)
                } else {
                    T::default()
                }
            } else if coeffs.delta[along] != 0.0 {
                azimuthal(idx, bn.get(at_face))
            } else {
                T::default()
            };

            let value = es.get(at_face) * (e_sign * coeffs.alpha)
                + bt.get(at_inner) * coeffs.beta
                + derivative * (d_sign * coeffs.delta[along]);
            bt.set(idx, value);
        }
    }
}
