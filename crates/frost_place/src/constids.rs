//! Reserved port and parameter names.
//!
//! Every [`Netlist`](crate::Netlist) interns these names first, so each
//! constant here is valid in any netlist and port lookups on the legality
//! path never touch the string table.

use frost_common::Ident;

macro_rules! constids {
    ($($name:ident),* $(,)?) => {
        constids!(@step 0u32; $($name,)*);

        /// All reserved names, in interning order.
        pub const RESERVED: &[&str] = &[$(stringify!($name)),*];
    };
    (@step $index:expr; $head:ident, $($rest:ident,)*) => {
        #[doc = concat!("Reserved name `", stringify!($head), "`.")]
        pub const $head: Ident = Ident::from_raw($index);
        constids!(@step $index + 1; $($rest,)*);
    };
    (@step $index:expr;) => {};
}

constids!(
    // logic cell
    I0,
    I1,
    I2,
    I3,
    O,
    CIN,
    COUT,
    CEN,
    CLK,
    SR,
    DFF_ENABLE,
    NEG_CLK,
    // IO cell
    PACKAGE_PIN,
    D_IN_0,
    D_OUT_0,
    INPUT_CLK,
    OUTPUT_CLK,
    CLOCK_ENABLE,
    // global buffer
    USER_SIGNAL_TO_GLOBAL_BUFFER,
    GLOBAL_BUFFER_OUTPUT,
    // block RAM
    RCLK,
    RCLKE,
    WCLK,
    WCLKE,
    // PLL
    REFERENCECLK,
    PLLOUTGLOBAL,
);

#[cfg(test)]
mod tests {
    use super::*;
    use frost_common::Interner;

    #[test]
    fn reserved_names_intern_to_their_constants() {
        let interner = Interner::with_reserved(RESERVED);
        assert_eq!(interner.get("I0"), Some(I0));
        assert_eq!(interner.get("CEN"), Some(CEN));
        assert_eq!(interner.get("GLOBAL_BUFFER_OUTPUT"), Some(GLOBAL_BUFFER_OUTPUT));
        assert_eq!(interner.resolve(PLLOUTGLOBAL), "PLLOUTGLOBAL");
        assert_eq!(interner.len(), RESERVED.len());
    }

    #[test]
    fn reserved_names_are_unique() {
        let mut names = RESERVED.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RESERVED.len());
    }
}
