/// Invoke the macro `$m` once per tuple arity, from sixteen type parameters down to one.
///
/// ```rust,ignore
/// macro_rules! impl_for_tuple {
///     ($($name: ident),*) => { impl<$($name: Trait),*> Trait for ($($name,)*) {} }
/// }
/// for_tuples!(impl_for_tuple);
/// ```
macro_rules! for_tuples {
    ($m:ident) => {
        $crate::ecs::util::for_tuples!(@step $m; A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P);
    };
    (@step $m:ident; $head:ident) => {
        $m!($head);
    };
    (@step $m:ident; $head:ident, $($tail:ident),*) => {
        $m!($head, $($tail),*);
        $crate::ecs::util::for_tuples!(@step $m; $($tail),*);
    };
}

pub(crate) use for_tuples;

#[cfg(test)]
mod tests {
    trait Arity {
        const ARITY: usize;
    }

    macro_rules! impl_arity {
        ($($name: ident),*) => {
            impl<$($name),*> Arity for ($($name,)*) {
                const ARITY: usize = [$(stringify!($name)),*].len();
            }
        }
    }

    for_tuples!(impl_arity);

    #[test]
    fn covers_one_through_sixteen() {
        assert_eq!(<(u8,) as Arity>::ARITY, 1);
        assert_eq!(<(u8, i32, f32) as Arity>::ARITY, 3);
        assert_eq!(
            <(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8) as Arity>::ARITY,
            16
        );
    }
}
