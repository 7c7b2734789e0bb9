//! # Curves Catalog
//!
//! Static descriptors for the SECG short-Weierstrass curves this crate
//! supports, plus a factory for user-defined curves. A descriptor alone
//! does not validate its invariants — constructing one is just a
//! 7-tuple; [`crate::ec::new_curve`] is what runs full domain validation.
//!
//! Parameter provenance: <https://www.secg.org/sec2-v2.pdf>. Field primes
//! are written as the power-of-two expressions the standard defines them
//! by (easier to double check against SEC 2 than a bare hex blob); the
//! remaining coefficients are transcribed as hex literals.

use num_bigint::BigUint;
use once_cell::sync::Lazy;

/// An elliptic-curve domain descriptor: `y^2 = x^3 + ax + b (mod p)`,
/// base point `G = (Gx, Gy)` of prime order `n`, and cofactor `h`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    /// Field modulus.
    pub p: BigUint,
    /// Linear coefficient.
    pub a: BigUint,
    /// Constant coefficient.
    pub b: BigUint,
    /// Base point x-coordinate.
    pub gx: BigUint,
    /// Base point y-coordinate.
    pub gy: BigUint,
    /// Order of the base point (and, since h=1 for every curve in this
    /// catalog, of the curve's group).
    pub n: BigUint,
    /// Cofactor.
    pub h: BigUint,
}

fn hex(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("curve constant is valid hex")
}

fn pow2(e: u64) -> BigUint {
    BigUint::from(1u32) << e
}

/// <https://www.secg.org/sec2-v2.pdf#subsubsection.2.2.1>
pub fn secp192k1() -> Curve {
    Curve {
        p: pow2(192) - pow2(32) - pow2(12) - pow2(8) - pow2(7) - pow2(6) - pow2(3) - BigUint::from(1u32),
        a: BigUint::from(0u32),
        b: BigUint::from(3u32),
        gx: hex("DB4FF10EC057E9AE26B07D0280B7F4341DA5D1B1EAE06C7D"),
        gy: hex("9B2F2F6D9C5628A7844163D015BE86344082AA88D95E2F9D"),
        n: hex("FFFFFFFFFFFFFFFFFFFFFFFE26F2FC170F69466A74DEFD8D"),
        h: BigUint::from(1u32),
    }
}

/// <https://www.secg.org/sec2-v2.pdf#subsubsection.2.2.2>
pub fn secp192r1() -> Curve {
    Curve {
        p: pow2(192) - pow2(64) - BigUint::from(1u32),
        a: hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFFFFFFFFFC"),
        b: hex("64210519E59C80E70FA7E9AB72243049FEB8DEECC146B9B1"),
        gx: hex("188DA80EB03090F67CBF20EB43A18800F4FF0AFD82FF1012"),
        gy: hex("7192B95FFC8DA78631011ED6B24CDD573F977A11E794811"),
        n: hex("FFFFFFFFFFFFFFFFFFFFFFFF99DEF836146BC9B1B4D22831"),
        h: BigUint::from(1u32),
    }
}

/// <https://www.secg.org/sec2-v2.pdf#subsubsection.2.3.1>
pub fn secp224k1() -> Curve {
    Curve {
        p: pow2(224) - pow2(32) - pow2(12) - pow2(11) - pow2(9) - pow2(7) - pow2(4) - BigUint::from(2u32)
            - BigUint::from(1u32),
        a: BigUint::from(0u32),
        b: BigUint::from(5u32),
        gx: hex("A1455B334DF099DF30FC28A169A467E9E47075A90F7E650EB6B7A45C"),
        gy: hex("7E089FED7FBA344282CAFBD6F7E319F7C0B0BD59E2CA4BDB556D61A5"),
        n: hex("10000000000000000000000000001DCE8D2EC6184CAF0A971769FB1F7"),
        h: BigUint::from(1u32),
    }
}

/// <https://www.secg.org/sec2-v2.pdf#subsubsection.2.3.2>
pub fn secp224r1() -> Curve {
    Curve {
        p: pow2(224) - pow2(96) + BigUint::from(1u32),
        a: hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFE"),
        b: hex("B4050A850C04B3ABF54132565044B0B7D7BFD8BA270B39432355FFB4"),
        gx: hex("B70E0CBD6BB4BF7F321390B94A03C1D356C21122343280D6115C1D21"),
        gy: hex("BD376388B5F723FB4C22DFE6CD4375A05A07476444D5819985007E34"),
        n: hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFF16A2E0B8F03E13DD29455C5C2A3D"),
        h: BigUint::from(1u32),
    }
}

/// <https://www.secg.org/sec2-v2.pdf#subsubsection.2.4.1>
pub fn secp256k1() -> Curve {
    Curve {
        p: pow2(256) - pow2(32) - BigUint::from(977u32),
        a: BigUint::from(0u32),
        b: BigUint::from(7u32),
        gx: hex("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"),
        gy: hex("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"),
        n: hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141"),
        h: BigUint::from(1u32),
    }
}

/// <https://www.secg.org/sec2-v2.pdf#subsubsection.2.4.2>
pub fn secp256r1() -> Curve {
    Curve {
        p: pow2(224) * (pow2(32) - BigUint::from(1u32)) + pow2(192) + pow2(96) - BigUint::from(1u32),
        a: hex("FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFC"),
        b: hex("5AC635D8AA3A93E7B3EBBD55769886BC651D06B0CC53B0F63BCE3C3E27D2604B"),
        gx: hex("6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296"),
        gy: hex("4FE342E2FE1A7F9B8EE7EB4A7C0F9E162BCE33576B315ECECBB6406837BF51F5"),
        n: hex("FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551"),
        h: BigUint::from(1u32),
    }
}

/// <https://www.secg.org/sec2-v2.pdf#subsubsection.2.5.1>
pub fn secp384r1() -> Curve {
    Curve {
        p: pow2(384) - pow2(128) - pow2(96) + pow2(32) - BigUint::from(1u32),
        a: hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFF0000000000000000FFFFFFFC"),
        b: hex("B3312FA7E23EE7E4988E056BE3F82D19181D9C6EFE8141120314088F5013875AC656398D8A2ED19D2A85C8EDD3EC2AEF"),
        gx: hex("AA87CA22BE8B05378EB1C71EF320AD746E1D3B628BA79B9859F741E082542A385502F25DBF55296C3A545E3872760AB7"),
        gy: hex("3617DE4A96262C6F5D9E98BF9292DC29F8F41DBD289A147CE9DA3113B5F0B8C00A60B1CE1D7E819D7A431D7C90EA0E5F"),
        n: hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFC7634D81F4372DDF581A0DB248B0A77AECEC196ACCC52973"),
        h: BigUint::from(1u32),
    }
}

/// <https://www.secg.org/sec2-v2.pdf#subsubsection.2.6.1>
pub fn secp521r1() -> Curve {
    Curve {
        p: pow2(521) - BigUint::from(1u32),
        a: hex("1FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFC"),
        b: hex("51953EB9618E1C9A1F929A21A0B68540EEA2DA725B99B315F3B8B489918EF109E156193951EC7E937B1652C0BD3BB1BF073573DF883D2C34F1EF451FD46B503F00"),
        gx: hex("C6858E06B70404E9CD9E3ECB662395B4429C648139053FB521F828AF606B4D3DBAA14B5E77EFE75928FE1DC127A2FFA8DE3348B3C1856A429BF97E7E31C2E5BD66"),
        gy: hex("11839296A789A3BC0045C8A5FB42C7D1BD998F54449579B446817AFBD17273E662C97EE72995EF42640C550B9013FAD0761353C7086A272C24088BE94769FD16650"),
        n: hex("1FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFA51868783BF2F966B7FCC0148F709A5D03BB5C9B8899C47AEBB6FB71E91386409"),
        h: BigUint::from(1u32),
    }
}

macro_rules! lazy_curve {
    ($name:ident, $ctor:path) => {
        static $name: Lazy<Curve> = Lazy::new($ctor);
    };
}

lazy_curve!(SECP192K1, secp192k1);
lazy_curve!(SECP192R1, secp192r1);
lazy_curve!(SECP224K1, secp224k1);
lazy_curve!(SECP224R1, secp224r1);
lazy_curve!(SECP256K1, secp256k1);
lazy_curve!(SECP256R1, secp256r1);
lazy_curve!(SECP384R1, secp384r1);
lazy_curve!(SECP521R1, secp521r1);

/// Look up a curve by its lowercase SECG identifier (`secp256r1`) or
/// NIST alias (`p-256`). Returns `None` if the name matches neither —
/// callers at the wrapper layer should map that to
/// [`crate::error::Error::UnsupportedCurve`].
pub fn by_name(name: &str) -> Option<Curve> {
    match name.to_ascii_lowercase().as_str() {
        "secp192k1" => Some(SECP192K1.clone()),
        "secp192r1" | "p-192" => Some(SECP192R1.clone()),
        "secp224k1" => Some(SECP224K1.clone()),
        "secp224r1" | "p-224" => Some(SECP224R1.clone()),
        "secp256k1" => Some(SECP256K1.clone()),
        "secp256r1" | "p-256" => Some(SECP256R1.clone()),
        "secp384r1" | "p-384" => Some(SECP384R1.clone()),
        "secp521r1" | "p-521" => Some(SECP521R1.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secp256k1_matches_known_constants() {
        let c = secp256k1();
        assert_eq!(c.b, BigUint::from(7u32));
        assert_eq!(
            c.p,
            hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F")
        );
    }

    #[test]
    fn test_by_name_accepts_secg_and_nist_aliases() {
        assert!(by_name("secp256r1").is_some());
        assert!(by_name("p-256").is_some());
        assert!(by_name("P-256").is_some());
        assert!(by_name("not-a-curve").is_none());
    }

    #[test]
    fn test_all_catalog_curves_have_cofactor_one() {
        for c in [
            secp192k1(),
            secp192r1(),
            secp224k1(),
            secp224r1(),
            secp256k1(),
            secp256r1(),
            secp384r1(),
            secp521r1(),
        ] {
            assert_eq!(c.h, BigUint::from(1u32));
        }
    }
}
