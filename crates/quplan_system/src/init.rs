//! Port initialization
//!
//! Gantree: L5_System → PortInit
//!
//! Plans every port of the control system, then writes the results. The
//! settings of all ports are computed before the first port is touched, so a
//! planning failure leaves the control system unchanged.
//!
//! | Port             | RF switch | Sideband | Gain                 | FNCO                    |
//! |------------------|-----------|----------|----------------------|-------------------------|
//! | CTRL generator   | pass      | L        | control vatt/fsc     | GE, EF, CR per channel  |
//! | READ_OUT generator | pass    | U        | readout vatt/fsc     | channel 0               |
//! | READ_IN capture  | open      | U        | -                    | every channel, + ndelay |

use quplan_config::{ControlParams, WiringInfo};
use quplan_core::{
    ControlSystem, MuxIndex, Port, PortId, PortRole, PortSettings, QuantumSystem, QuplanResult,
    RfSwitch, Sideband, Synthesis,
};
use quplan_planner::{FrequencyPlanner, ReadoutSettings};
use std::collections::BTreeMap;

/// Compute the settings of every port, in control-system order
/// Gantree: plan_ports(quantum, control, wiring, params, planner) -> Vec // 포트 계획
pub fn plan_ports(
    quantum: &QuantumSystem,
    control: &ControlSystem,
    wiring: &WiringInfo,
    params: &ControlParams,
    planner: &FrequencyPlanner,
) -> QuplanResult<Vec<(PortId, PortSettings)>> {
    let mut readout_plans: BTreeMap<MuxIndex, ReadoutSettings> = BTreeMap::new();
    let mut readout_plan = |index: MuxIndex| -> QuplanResult<ReadoutSettings> {
        if let Some(settings) = readout_plans.get(&index) {
            return Ok(*settings);
        }
        let settings = planner.plan_readout(quantum.get_mux(index)?)?;
        readout_plans.insert(index, settings);
        Ok(settings)
    };

    let mut planned = Vec::new();
    for port in control.ports() {
        let settings = match port.role() {
            PortRole::Ctrl => plan_control_port(quantum, wiring, params, planner, port)?,
            PortRole::ReadOut => match wiring.mux_by_read_out_port(port.id()) {
                Some(index) => {
                    let plan = readout_plan(index)?;
                    PortSettings {
                        rf_switch: RfSwitch::Pass,
                        synthesis: Some(Synthesis {
                            lo_freq: plan.lo,
                            cnco_freq: plan.cnco,
                            sideband: Sideband::Upper,
                            vatt: Some(params.get_readout_vatt(index)),
                            fullscale_current: Some(params.get_readout_fsc(index)),
                            fnco_freqs: vec![plan.fnco],
                            ndelay: None,
                        }),
                    }
                }
                None => unused(port, RfSwitch::Pass),
            },
            PortRole::ReadIn => match wiring.mux_by_read_in_port(port.id()) {
                Some(index) => {
                    let plan = readout_plan(index)?;
                    PortSettings {
                        rf_switch: RfSwitch::Open,
                        synthesis: Some(Synthesis {
                            lo_freq: plan.lo,
                            cnco_freq: plan.cnco,
                            sideband: Sideband::Upper,
                            vatt: None,
                            fullscale_current: None,
                            fnco_freqs: vec![plan.fnco; port.n_channels()],
                            ndelay: Some(params.get_capture_delay(index)),
                        }),
                    }
                }
                None => unused(port, RfSwitch::Open),
            },
        };
        if let Some(synthesis) = &settings.synthesis {
            log::debug!(
                "port {}: lo={} cnco={} sideband={} fnco={:?}",
                port.id(),
                synthesis.lo_freq,
                synthesis.cnco_freq,
                synthesis.sideband,
                synthesis.fnco_freqs
            );
        }
        planned.push((port.id().clone(), settings));
    }
    Ok(planned)
}

fn plan_control_port(
    quantum: &QuantumSystem,
    wiring: &WiringInfo,
    params: &ControlParams,
    planner: &FrequencyPlanner,
    port: &Port,
) -> QuplanResult<PortSettings> {
    let Some(label) = wiring.qubit_by_ctrl_port(port.id()) else {
        return Ok(unused(port, RfSwitch::Pass));
    };
    let qubit = quantum.get_qubit(label)?;
    let plan = planner.plan_control(quantum, qubit, port.n_channels())?;
    Ok(PortSettings {
        rf_switch: RfSwitch::Pass,
        synthesis: Some(Synthesis {
            lo_freq: plan.lo,
            cnco_freq: plan.cnco,
            sideband: Sideband::Lower,
            vatt: Some(params.get_control_vatt(label)),
            fullscale_current: Some(params.get_control_fsc(label)),
            fnco_freqs: plan.fncos()[..port.n_channels()].to_vec(),
            ndelay: None,
        }),
    })
}

fn unused(port: &Port, rf_switch: RfSwitch) -> PortSettings {
    log::debug!("port {} is not wired, leaving it unsynthesized", port.id());
    PortSettings::unused(rf_switch)
}

/// Write planned settings into the control system
pub fn apply_ports(
    control: &mut ControlSystem,
    planned: Vec<(PortId, PortSettings)>,
) -> QuplanResult<()> {
    for (id, settings) in planned {
        control.configure_port(&id, settings)?;
    }
    Ok(())
}
