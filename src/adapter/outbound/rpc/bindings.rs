//! Solidity interfaces for the PLSTR contract and the vPLS token.

use alloy_sol_types::sol;

sol! {
    #[sol(rpc)]
    contract IPulseStrategy {
        function getContractInfo() external view returns (uint256 contractBalance, uint256 remainingIssuancePeriod);
        function balanceOf(address account) external view returns (uint256);
        function getVPLSBackingRatio() external view returns (uint256);
        function getRedeemableStakedPLS(address user, uint256 amount) external view returns (uint256);
        function redeemableVPLS(address user) external view returns (uint256);
        function owner() external view returns (address);
        function getOwnerMintInfo() external view returns (uint256 nextMintTime);
        function getUserShareInfo(address user) external view returns (uint256 shareBalance);

        function issueShares(uint256 amount) external;
        function redeemShares(uint256 amount) external;
        function depositStakedPLS(uint256 amount) external;
        function mintShares(uint256 amount) external;
        function recoverTokens(address token, address recipient, uint256 amount) external;
        function transferOwnership(address newOwner) external;
    }
}

// ERC-20 interface (minimal for approval)
sol! {
    #[sol(rpc)]
    contract IERC20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
    }
}
