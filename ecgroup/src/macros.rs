//! Internal macros.

/// Define borrow and non-borrow variants of a binary operator, given an
/// implementation on `&LHS op &RHS`.
macro_rules! define_binop_variants {
    (impl $trait:ident, $method:ident for LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        impl<'b> core::ops::$trait<&'b $rhs> for $lhs {
            type Output = $out;

            fn $method(self, rhs: &'b $rhs) -> $out {
                core::ops::$trait::$method(&self, rhs)
            }
        }

        impl<'a> core::ops::$trait<$rhs> for &'a $lhs {
            type Output = $out;

            fn $method(self, rhs: $rhs) -> $out {
                core::ops::$trait::$method(self, &rhs)
            }
        }

        impl core::ops::$trait<$rhs> for $lhs {
            type Output = $out;

            fn $method(self, rhs: $rhs) -> $out {
                core::ops::$trait::$method(&self, &rhs)
            }
        }
    };
}

/// Define `OpAssign<&RHS>` and `OpAssign<RHS>` in terms of `&LHS op &RHS`.
macro_rules! define_assign_variants {
    (impl $trait:ident, $method:ident, $op:ident, $op_method:ident for LHS = $lhs:ty, RHS = $rhs:ty) => {
        impl<'b> core::ops::$trait<&'b $rhs> for $lhs {
            fn $method(&mut self, rhs: &'b $rhs) {
                *self = core::ops::$op::$op_method(&*self, rhs);
            }
        }

        impl core::ops::$trait<$rhs> for $lhs {
            fn $method(&mut self, rhs: $rhs) {
                *self = core::ops::$op::$op_method(&*self, &rhs);
            }
        }
    };
}

/// Define `Neg` for an owned value in terms of `Neg` for a reference.
macro_rules! define_neg_variant {
    ($ty:ty) => {
        impl core::ops::Neg for $ty {
            type Output = $ty;

            fn neg(self) -> $ty {
                -&self
            }
        }
    };
}
