//! Stack Cells
//!
//! Get-method results carry slices and cells as base64 bags of cells. Only
//! the root cell is kept; addresses are read from it with `tonlib-core`.

use tonlib_core::TonAddress;
use tonlib_core::cell::{ArcCell, BagOfCells, TonCellError};

/// Raw form of `addr_none` as returned by the cell parser.
const NONE_ADDRESS: &str = "0:0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("slice holds addr_none")]
    NoneAddress,
    #[error(transparent)]
    Cell(#[from] TonCellError),
}

/// Decode a base64 bag of cells and return its single root.
pub fn parse_boc_base64(encoded: &str) -> Result<ArcCell, TonCellError> {
    let boc = BagOfCells::parse_base64(encoded.trim())?;
    Ok(boc.single_root()?.clone())
}

/// Read a `MsgAddressInt` from the start of `cell`.
pub fn load_address(cell: &ArcCell) -> Result<TonAddress, AddressError> {
    let mut parser = cell.parser();
    let address = parser.load_address()?;

    if address.to_hex() == NONE_ADDRESS {
        return Err(AddressError::NoneAddress);
    }
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, prelude::BASE64_STANDARD};
    use std::sync::Arc;
    use tonlib_core::cell::CellBuilder;

    const FRIENDLY: &str = "EQCxE6mUtQJKFnGfaROTKOt1lZbDiiX1kCixRv7Nw2Id_sDs";
    const RAW: &str = "0:b113a994b5024a16719f69139328eb759596c38a25f59028b146fecdc3621dfe";

    #[test]
    fn test_load_address_from_base64_boc() {
        let address: TonAddress = FRIENDLY.parse().unwrap();
        let cell = CellBuilder::new()
            .store_address(&address)
            .unwrap()
            .build()
            .unwrap();
        let boc = BagOfCells::from_root(cell).serialize(false).unwrap();

        let root = parse_boc_base64(&BASE64_STANDARD.encode(boc)).unwrap();
        let loaded = load_address(&root).unwrap();

        assert_eq!(loaded, address);
        assert_eq!(loaded.to_hex(), RAW);
    }

    #[test]
    fn test_addr_none_is_rejected() {
        let cell = CellBuilder::new().store_u8(2, 0).unwrap().build().unwrap();

        assert!(load_address(&Arc::new(cell)).is_err());
    }

    #[test]
    fn test_truncated_address() {
        let cell = CellBuilder::new()
            .store_u8(2, 0b10)
            .unwrap()
            .store_u8(8, 0)
            .unwrap()
            .build()
            .unwrap();

        assert!(matches!(
            load_address(&Arc::new(cell)),
            Err(AddressError::Cell(_))
        ));
    }

    #[test]
    fn test_not_a_boc() {
        assert!(parse_boc_base64("AAAA").is_err());
        assert!(parse_boc_base64("not base64!").is_err());
    }
}
